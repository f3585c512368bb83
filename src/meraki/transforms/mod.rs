//! Transform pipeline infrastructure
//!
//! Parsing is a chain of stages, each fully consuming its input before the next one starts.
//! Stages are values implementing [`Runnable`]; [`Transform`] composes them, and the compiler
//! checks that each stage's output type is the next stage's input type.
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(Tokenization::new())              // String → Lexed
//!     .then(CommentExtraction::new())         // Lexed → Extracted
//!     .then(StructuralParsing::default())     // Extracted → Provisional
//!     .then(AttachComments::new());           // Provisional → Parsed
//! ```
//!
//! Every stage fails with the same [`ParseError`], so a pipeline stops at the first
//! structural error wherever it happens. Comment problems are not failures; they ride along
//! in the stage outputs as warnings.
//!
//! # Module Organization
//!
//! - [`stages`]: Individual transformation stages
//! - [`standard`]: Pre-built pipelines using default options

pub mod stages;
pub mod standard;

use crate::meraki::ast::ParseError;

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, ParseError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, ParseError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, ParseError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Chain a pre-built static transform after this one
    pub fn then_transform<O2>(self, next: &'static Transform<O, O2>) -> Transform<I, O2>
    where
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                next.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, ParseError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, ParseError> {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meraki::ast::ErrorKind;

    struct DoubleNumber;

    impl Runnable<i32, i32> for DoubleNumber {
        fn run(&self, input: i32) -> Result<i32, ParseError> {
            Ok(input * 2)
        }
    }

    struct IntToString;

    impl Runnable<i32, String> for IntToString {
        fn run(&self, input: i32) -> Result<String, ParseError> {
            Ok(input.to_string())
        }
    }

    struct FailingStage;

    impl Runnable<i32, i32> for FailingStage {
        fn run(&self, input: i32) -> Result<i32, ParseError> {
            Err(ParseError::malformed_keybinding(
                input as usize,
                "intentional failure",
            ))
        }
    }

    #[test]
    fn test_stages_chain_in_order() {
        let transform = Transform::from_fn(|x: i32| Ok(x + 1))
            .then(DoubleNumber)
            .then(IntToString);
        assert_eq!(transform.run(4).unwrap(), "10");
    }

    #[test]
    fn test_failure_stops_the_chain() {
        let transform = Transform::from_fn(Ok).then(FailingStage).then(IntToString);
        let err = transform.run(7).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedKeybinding);
        assert_eq!(err.line, 7);
    }

    #[test]
    fn test_transform_is_runnable() {
        let inner = Transform::from_fn(|x: i32| Ok(x * 3));
        let outer = Transform::from_fn(Ok).then(inner).then(DoubleNumber);
        assert_eq!(Runnable::run(&outer, 2).unwrap(), 12);
    }
}
