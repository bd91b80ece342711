//! List executor - routes instruction batches to the statement executor
//!
//! Instruction shapes (token 0 is the id, token 1 the command):
//!
//! | Command         | Minimum tokens | Arguments start at |
//! |-----------------|----------------|--------------------|
//! | `import`        | 3              | 2 (path)           |
//! | `make`          | 4              | 4                  |
//! | `call`          | 4              | 4                  |
//! | `callAndAssign` | 5              | 5                  |
//!
//! Every instruction yields exactly one result, in input order, whether or
//! not earlier instructions failed.

use crate::codec;

use super::exception::Exception;
use super::statement::StatementExecutor;

/// One instruction: id, command, operands
pub type Instruction = Vec<String>;

/// Result string returned by `make` and `import`
pub const OK: &str = "OK";

/// Conventional result of a fixture method with nothing to report
pub const VOID: &str = "/__VOID__/";

/// Result of one instruction, paired with its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementResult {
    pub id: String,
    pub result: String,
}

impl StatementResult {
    pub fn is_exception(&self) -> bool {
        super::exception::is_exception(&self.result)
    }
}

/// Executes instruction batches against one session
#[derive(Debug, Default)]
pub struct ListExecutor {
    executor: StatementExecutor,
}

impl ListExecutor {
    pub fn new(executor: StatementExecutor) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &StatementExecutor {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut StatementExecutor {
        &mut self.executor
    }

    /// Execute a batch. Session state carries over between batches.
    pub fn execute(&mut self, instructions: &[Instruction]) -> Vec<StatementResult> {
        instructions
            .iter()
            .map(|instruction| {
                let id = instruction.first().cloned().unwrap_or_default();
                let result = match self.dispatch(instruction) {
                    Ok(value) => value,
                    Err(exception) => {
                        tracing::warn!(id = %id, code = exception.code(), "{}", exception);
                        exception.to_result()
                    }
                };
                StatementResult { id, result }
            })
            .collect()
    }

    fn dispatch(&mut self, instruction: &[String]) -> Result<String, Exception> {
        let Some(command) = instruction.get(1) else {
            return Err(malformed(instruction));
        };
        tracing::debug!(id = %instruction[0], command = %command, "Executing instruction");

        match command.as_str() {
            "import" => {
                require(instruction, 3)?;
                Ok(OK.to_string())
            }
            "make" => {
                require(instruction, 4)?;
                let mut args = instruction[4..].to_vec();
                self.executor
                    .make(&instruction[2], &instruction[3], &mut args)
                    .map(|()| OK.to_string())
            }
            "call" => {
                require(instruction, 4)?;
                let mut args = instruction[4..].to_vec();
                self.executor.call(&instruction[2], &instruction[3], &mut args)
            }
            "callAndAssign" => {
                require(instruction, 5)?;
                let mut args = instruction[5..].to_vec();
                // Failures are bound too: the symbol receives the exception text
                let result = self
                    .executor
                    .call(&instruction[3], &instruction[4], &mut args)
                    .unwrap_or_else(|e| e.to_result());
                self.executor.set_symbol(&instruction[2], &result);
                Ok(result)
            }
            _ => Err(Exception::invalid_statement(&instruction[0], command)),
        }
    }
}

fn require(instruction: &[String], min_tokens: usize) -> Result<(), Exception> {
    if instruction.len() < min_tokens {
        Err(malformed(instruction))
    } else {
        Ok(())
    }
}

fn malformed(instruction: &[String]) -> Exception {
    Exception::MalformedInstruction(codec::render(instruction))
}

/// Encode results as a Slim list of `[id, result]` pairs
pub fn encode_results(results: &[StatementResult]) -> String {
    let pairs: Vec<String> = results
        .iter()
        .map(|r| codec::encode(&[r.id.as_str(), r.result.as_str()]))
        .collect();
    codec::encode(&pairs)
}

/// Decode a Slim-encoded batch. Elements that are not lists become
/// one-token instructions, which then execute as malformed.
pub fn decode_instructions(text: &str) -> Result<Vec<Instruction>, codec::CodecError> {
    Ok(codec::decode(text)?
        .into_iter()
        .map(|item| codec::decode(&item).unwrap_or_else(|_| vec![item]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::fixture::{method, ConstructError, Handle, MethodResult};

    fn instruction(tokens: &[&str]) -> Instruction {
        tokens.iter().map(|s| s.to_string()).collect()
    }

    fn session() -> ListExecutor {
        let mut executor = StatementExecutor::new();
        executor.register_fixture("Echo", |_: &[String]| -> Result<Handle, ConstructError> {
            Ok(Box::new(()))
        });
        executor.register_method(
            "Echo",
            "echo",
            method(|_: &mut (), args: &[String]| Ok(args.join(" "))),
        );
        executor.register_method("Echo", "answer", method(|_: &mut (), _: &[String]| Ok("42".into())));
        executor.register_method(
            "Echo",
            "crash",
            method(|_: &mut (), _: &[String]| -> MethodResult { panic!("crashed") }),
        );
        ListExecutor::new(executor)
    }

    fn results(list: &mut ListExecutor, batch: &[&[&str]]) -> Vec<(String, String)> {
        let batch: Vec<Instruction> = batch.iter().map(|t| instruction(t)).collect();
        list.execute(&batch)
            .into_iter()
            .map(|r| (r.id, r.result))
            .collect()
    }

    fn pair(id: &str, result: &str) -> (String, String) {
        (id.to_string(), result.to_string())
    }

    #[test]
    fn test_import_make_call() {
        let mut list = session();
        let out = results(
            &mut list,
            &[
                &["1", "import", "some.path"],
                &["2", "make", "e", "Echo"],
                &["3", "call", "e", "echo", "a", "b"],
            ],
        );
        assert_eq!(out, vec![pair("1", "OK"), pair("2", "OK"), pair("3", "a b")]);
    }

    #[test]
    fn test_malformed_call_does_not_short_circuit() {
        let mut list = session();
        let out = results(
            &mut list,
            &[
                &["id1", "call", "inst"],
                &["id2", "make", "e", "Echo"],
                &["id3", "call", "e", "answer"],
            ],
        );
        assert_eq!(
            out[0],
            pair(
                "id1",
                r#"__EXCEPTION__:message:<<MALFORMED_INSTRUCTION ["id1", "call", "inst"].>>"#
            )
        );
        assert_eq!(out[1], pair("id2", "OK"));
        assert_eq!(out[2], pair("id3", "42"));
    }

    #[test]
    fn test_minimum_token_counts() {
        let mut list = session();
        let out = results(
            &mut list,
            &[
                &["a", "import"],
                &["b", "make", "e"],
                &["c", "callAndAssign", "v", "e"],
                &["d"],
                &[],
            ],
        );
        assert_eq!(out.len(), 5);
        for (id, result) in &out {
            assert!(
                result.starts_with("__EXCEPTION__:message:<<MALFORMED_INSTRUCTION "),
                "{id}: {result}"
            );
        }
        assert_eq!(out[3].1, r#"__EXCEPTION__:message:<<MALFORMED_INSTRUCTION ["d"].>>"#);
        assert_eq!(out[4], pair("", "__EXCEPTION__:message:<<MALFORMED_INSTRUCTION [].>>"));
    }

    #[test]
    fn test_panicking_fixture_does_not_lose_batch() {
        let mut list = session();
        let out = results(
            &mut list,
            &[
                &["1", "make", "e", "Echo"],
                &["2", "call", "e", "crash"],
                &["3", "call", "e", "answer"],
            ],
        );
        assert_eq!(out.len(), 3);
        assert_eq!(out[1], pair("2", "__EXCEPTION__:message:<<crashed.>>"));
        assert_eq!(out[2], pair("3", "42"));
    }

    #[test]
    fn test_invalid_command() {
        let mut list = session();
        let out = results(&mut list, &[&["9", "explode", "x"]]);
        assert_eq!(
            out,
            vec![pair("9", r#"__EXCEPTION__:message:<<INVALID_STATEMENT: ["9", "explode"].>>"#)]
        );
    }

    #[test]
    fn test_call_and_assign_binds_result() {
        let mut list = session();
        let out = results(
            &mut list,
            &[
                &["1", "make", "e", "Echo"],
                &["2", "callAndAssign", "v", "e", "answer"],
                &["3", "call", "e", "echo", "$v", "is the answer"],
            ],
        );
        assert_eq!(out[1], pair("2", "42"));
        assert_eq!(out[2], pair("3", "42 is the answer"));
    }

    #[test]
    fn test_call_and_assign_binds_exception_text() {
        let mut list = session();
        let out = results(
            &mut list,
            &[
                &["1", "callAndAssign", "v", "ghost", "answer"],
                &["2", "make", "e", "Echo"],
                &["3", "call", "e", "echo", "$v"],
            ],
        );
        let expected = "__EXCEPTION__:message:<<NO_INSTANCE ghost.>>";
        assert_eq!(out[0], pair("1", expected));
        assert_eq!(out[2], pair("3", expected));
    }

    #[test]
    fn test_state_persists_across_batches() {
        let mut list = session();
        results(&mut list, &[&["1", "make", "e", "Echo"]]);
        let out = results(&mut list, &[&["2", "call", "e", "answer"]]);
        assert_eq!(out, vec![pair("2", "42")]);
    }

    #[test]
    fn test_encode_results() {
        let encoded = encode_results(&[StatementResult {
            id: "1".into(),
            result: "OK".into(),
        }]);
        assert_eq!(encoded, "[000001:000028:[000002:000001:1:000002:OK:]:]");
    }

    #[test]
    fn test_decode_instructions() {
        let make = codec::encode(&["1", "make", "e", "Echo"]);
        let batch = codec::encode(&[make.as_str(), "stray"]);

        let instructions = decode_instructions(&batch).unwrap();
        assert_eq!(instructions[0], instruction(&["1", "make", "e", "Echo"]));
        assert_eq!(instructions[1], instruction(&["stray"]));
        assert!(decode_instructions("not a list").is_err());
    }
}
