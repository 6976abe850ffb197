//! Assembling a context from DIMACS CNF input.
//!
//! The reader is a byte-level state machine over the strict DIMACS subset:
//! comment lines, one `p cnf <variables> <clauses>` header, and `0`-terminated
//! clause lines of signed, 1-based, space-separated literals. Counts declared
//! by the header are checked against the input once it ends.
//!
//! Unsatisfiability may surface during addition, in which case the rest of
//! the input is skipped. The context notes the result, so a subsequent solve
//! reports it; reading is cut short purely to avoid pointless work.
//!
//! [context_from_path] decompresses `.xz` and `.gz` files transparently.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use flate2::read::GzDecoder;
use xz2::read::XzDecoder;

use crate::{
    config::Config,
    context::Context,
    misc::log::targets,
    structures::{clause::CClause, literal::Literal},
    types::err,
};

/// Where in the input the reader stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParseState {
    /// At the start of a line.
    LineStart,
    /// The line is over; only a line break may follow.
    ExpectLineBreak,
    /// Within a comment.
    Comment,

    // Within `p cnf `, by expected character.
    HeaderSpace,
    HeaderC,
    HeaderN,
    HeaderF,
    HeaderPad,

    /// The first digit of the declared variable count.
    VariableCountDigit,
    /// Further digits of the declared variable count.
    VariableCount,
    /// The first digit of the declared clause count.
    ClauseCountDigit,
    /// Further digits of the declared clause count.
    ClauseCount,

    /// The first digit of a literal, after its sign.
    LiteralDigit,
    /// Further digits of a literal.
    LiteralBody,
    /// Between literals: a sign, a digit, or the terminating `0`.
    ClauseBreak,
}

impl Context {
    /// Reads a DIMACS formula into the context.
    ///
    /// ```rust
    /// # use mink_sat::config::Config;
    /// # use mink_sat::context::Context;
    /// # use mink_sat::types::gen::Report;
    /// let mut context = Context::from_config(Config::default());
    /// let dimacs = "\
    /// c a comment
    /// p cnf 2 2
    /// 1 -2 0
    /// 2 0
    /// ";
    /// assert!(context.read_dimacs(dimacs.as_bytes()).is_ok());
    /// assert_eq!(context.solve(), Report::Satisfiable);
    /// ```
    pub fn read_dimacs(&mut self, mut reader: impl BufRead) -> Result<(), err::Build> {
        use ParseState::*;

        let mut state = LineStart;
        let mut line = 1;
        let mut processed_header = false;

        let mut declared_variables: u32 = 0;
        let mut declared_clauses: u32 = 0;
        let mut observed_variables: u32 = 0;
        let mut observed_clauses: u32 = 0;

        let mut clause: CClause = Vec::default();
        let mut variable: u32 = 0;
        let mut sign = true;

        'read_loop: loop {
            let buffer = reader.fill_buf()?;
            if buffer.is_empty() {
                break 'read_loop;
            }
            let bytes_read = buffer.len();

            for &character in buffer {
                if character == b'\n' {
                    line += 1;
                }

                match state {
                    LineStart => match character {
                        b'\n' | b'\r' => {}
                        b'p' if !processed_header => {
                            processed_header = true;
                            state = HeaderSpace;
                        }
                        b'c' => state = Comment,
                        b'-' if processed_header => {
                            sign = false;
                            state = LiteralDigit;
                            clause.clear();
                            observed_clauses += 1;
                        }
                        b'1'..=b'9' if processed_header => {
                            variable = (character - b'0') as u32;
                            sign = true;
                            state = LiteralBody;
                            clause.clear();
                            observed_clauses += 1;
                        }
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },

                    ExpectLineBreak => match character {
                        b'\n' | b'\r' => state = LineStart,
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },

                    Comment => match character {
                        b'\n' | b'\r' => state = LineStart,
                        _ => {}
                    },

                    HeaderSpace => match character {
                        b' ' => state = HeaderC,
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },
                    HeaderC => match character {
                        b'c' => state = HeaderN,
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },
                    HeaderN => match character {
                        b'n' => state = HeaderF,
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },
                    HeaderF => match character {
                        b'f' => state = HeaderPad,
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },
                    HeaderPad => match character {
                        b' ' => state = VariableCountDigit,
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },

                    VariableCountDigit => match character {
                        b'1'..=b'9' => {
                            declared_variables = (character - b'0') as u32;
                            state = VariableCount;
                        }
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },
                    VariableCount => match character {
                        b' ' => state = ClauseCountDigit,
                        b'0'..=b'9' => {
                            declared_variables =
                                10 * declared_variables + (character - b'0') as u32;
                        }
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },
                    ClauseCountDigit => match character {
                        b'1'..=b'9' => {
                            declared_clauses = (character - b'0') as u32;
                            state = ClauseCount;
                        }
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },
                    ClauseCount => match character {
                        b'\n' | b'\r' => {
                            log::trace!(target: targets::PREPROCESSING, "Header: {declared_variables} variables, {declared_clauses} clauses");
                            self.create_variables(declared_variables);
                            state = LineStart;
                        }
                        b'0'..=b'9' => {
                            declared_clauses = 10 * declared_clauses + (character - b'0') as u32;
                        }
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },

                    LiteralDigit => match character {
                        b'1'..=b'9' => {
                            variable = (character - b'0') as u32;
                            state = LiteralBody;
                        }
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },
                    LiteralBody => match character {
                        b' ' => {
                            if variable > declared_variables {
                                return Err(err::Parse::VariableCountMismatch {
                                    declared: declared_variables,
                                    observed: variable,
                                }
                                .into());
                            }
                            clause.push(Literal::fresh(variable - 1, sign));
                            if variable > observed_variables {
                                observed_variables = variable;
                            }
                            sign = true;
                            state = ClauseBreak;
                        }
                        b'0'..=b'9' => {
                            variable = 10 * variable + (character - b'0') as u32;
                        }
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },
                    ClauseBreak => match character {
                        b'-' => {
                            sign = false;
                            state = LiteralDigit;
                        }
                        b'0' => {
                            state = ExpectLineBreak;
                            if !self.add_clause(&clause) {
                                return Err(err::Build::Unsatisfiable);
                            }
                        }
                        b'1'..=b'9' => {
                            variable = (character - b'0') as u32;
                            state = LiteralBody;
                        }
                        _ => return Err(err::Parse::UnexpectedCharacter(line).into()),
                    },
                }
            }

            reader.consume(bytes_read);
        }

        if state != LineStart {
            return Err(err::Parse::UnexpectedEnd.into());
        }

        if observed_variables != declared_variables {
            return Err(err::Parse::VariableCountMismatch {
                declared: declared_variables,
                observed: observed_variables,
            }
            .into());
        }
        if observed_clauses != declared_clauses {
            return Err(err::Parse::ClauseCountMismatch {
                declared: declared_clauses,
                observed: observed_clauses,
            }
            .into());
        }

        Ok(())
    }
}

/// A context holding the formula at the given path, decompressed by extension.
pub fn context_from_path(path: impl AsRef<Path>, config: Config) -> Result<Context, err::Build> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut context = Context::from_config(config);

    match path.extension() {
        Some(extension) if extension == "xz" => {
            context.read_dimacs(BufReader::new(XzDecoder::new(file)))?;
        }
        Some(extension) if extension == "gz" => {
            context.read_dimacs(BufReader::new(GzDecoder::new(file)))?;
        }
        _ => {
            context.read_dimacs(BufReader::new(file))?;
        }
    };

    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::gen::Report;

    fn fresh_context() -> Context {
        Context::from_config(Config::default())
    }

    #[test]
    fn counts_are_validated() {
        let mut context = fresh_context();
        let result = context.read_dimacs("p cnf 2 2\n1 2 0\n".as_bytes());
        assert!(matches!(
            result,
            Err(err::Build::Parse(err::Parse::ClauseCountMismatch {
                declared: 2,
                observed: 1,
            }))
        ));

        let mut context = fresh_context();
        let result = context.read_dimacs("p cnf 3 1\n1 2 0\n".as_bytes());
        assert!(matches!(
            result,
            Err(err::Build::Parse(err::Parse::VariableCountMismatch {
                declared: 3,
                observed: 2,
            }))
        ));
    }

    #[test]
    fn literals_outside_the_declaration_are_rejected() {
        let mut context = fresh_context();
        let result = context.read_dimacs("p cnf 1 1\n1 7 0\n".as_bytes());
        assert!(matches!(
            result,
            Err(err::Build::Parse(err::Parse::VariableCountMismatch {
                declared: 1,
                observed: 7,
            }))
        ));
    }

    #[test]
    fn a_missing_line_break_is_rejected() {
        let mut context = fresh_context();
        let result = context.read_dimacs("p cnf 1 1\n1 0".as_bytes());
        assert!(matches!(
            result,
            Err(err::Build::Parse(err::Parse::UnexpectedEnd))
        ));
    }

    #[test]
    fn a_broken_header_is_rejected() {
        let mut context = fresh_context();
        let result = context.read_dimacs("p cnf\n1 0\n".as_bytes());
        assert!(matches!(result, Err(err::Build::Parse(_))));
    }

    #[test]
    fn comments_are_skipped() {
        let mut context = fresh_context();
        let dimacs = "c the smallest formula\nc of any interest\np cnf 1 1\n1 0\n";
        assert!(context.read_dimacs(dimacs.as_bytes()).is_ok());
        assert_eq!(context.solve(), Report::Satisfiable);
    }

    #[test]
    fn addition_may_cut_reading_short() {
        let mut context = fresh_context();
        let dimacs = "p cnf 1 2\n1 0\n-1 0\n";
        assert!(matches!(
            context.read_dimacs(dimacs.as_bytes()),
            Err(err::Build::Unsatisfiable)
        ));
        assert_eq!(context.solve(), Report::Unsatisfiable);
    }

    #[test]
    fn an_empty_input_is_trivial() {
        let mut context = fresh_context();
        assert!(context.read_dimacs("".as_bytes()).is_ok());
        assert_eq!(context.solve(), Report::Unknown);
    }
}
