//! Function signature matchers.

use std::fmt;

use thiserror::Error;

use loopir_foundation::FqName;
use loopir_ir::{FunctionTable, IrCall, IrFunction, IrValueParameter};

/// Predicate over a function's qualified name.
pub type FqNamePredicate = Box<dyn Fn(&FqName) -> bool + Send + Sync>;

/// Predicate over a function's value parameter count.
pub type SizePredicate = Box<dyn Fn(usize) -> bool + Send + Sync>;

/// Predicate over a receiver or value parameter.
pub type ParameterPredicate = Box<dyn Fn(&IrValueParameter) -> bool + Send + Sync>;

/// Which implicit receiver a matched function must declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiverKind {
    /// Any receiver, or none. Receiver predicates see the dispatch
    /// receiver if present, else the extension receiver.
    Any,
    /// Neither a dispatch nor an extension receiver.
    NoReceiver,
    /// An extension receiver; predicates see it.
    Extension,
    /// A dispatch receiver; predicates see it.
    Method,
}

/// Errors raised while building a matcher.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatcherError {
    /// Receiver predicates were registered on a matcher for functions
    /// that have no receiver, so they could never be consulted.
    #[error("matcher for functions without receiver has {count} receiver restriction(s)")]
    ReceiverRestrictionWithoutReceiver { count: usize },
}

/// Immutable bundle of predicates recognizing a function signature.
///
/// Built with [`FunctionMatcher::builder`]. Predicates are evaluated by
/// category (receiver, qualified name, parameter count, per-index
/// parameters) and in registration order within a category; evaluation
/// stops at the first failing predicate.
pub struct FunctionMatcher {
    kind: ReceiverKind,
    receiver: Vec<ParameterPredicate>,
    fq_name: Vec<FqNamePredicate>,
    parameters_size: Vec<SizePredicate>,
    parameters: Vec<(usize, ParameterPredicate)>,
}

impl FunctionMatcher {
    /// Start describing a matcher for functions with the given receiver kind.
    pub fn builder(kind: ReceiverKind) -> FunctionMatcherBuilder {
        FunctionMatcherBuilder {
            matcher: FunctionMatcher {
                kind,
                receiver: Vec::new(),
                fq_name: Vec::new(),
                parameters_size: Vec::new(),
                parameters: Vec::new(),
            },
        }
    }

    pub fn kind(&self) -> ReceiverKind {
        self.kind
    }

    /// Check whether `function` satisfies every predicate.
    pub fn matches(&self, function: &IrFunction) -> bool {
        self.matches_receiver(function)
            && self.fq_name.iter().all(|pred| pred(&function.fq_name))
            && self
                .parameters_size
                .iter()
                .all(|pred| pred(function.value_parameters.len()))
            && self.parameters.iter().all(|(index, pred)| {
                function
                    .value_parameters
                    .get(*index)
                    .is_some_and(|param| pred(param))
            })
    }

    /// Resolve the callee of `call` and check it.
    ///
    /// An unresolved callee never matches.
    pub fn matches_call(&self, call: &IrCall, functions: &FunctionTable) -> bool {
        functions
            .get(&call.callee)
            .is_some_and(|function| self.matches(function))
    }

    fn matches_receiver(&self, function: &IrFunction) -> bool {
        let dispatch = function.dispatch_receiver_parameter.as_ref();
        let extension = function.extension_receiver_parameter.as_ref();

        let receiver = match self.kind {
            ReceiverKind::NoReceiver => return dispatch.is_none() && extension.is_none(),
            ReceiverKind::Any => dispatch.or(extension),
            ReceiverKind::Extension => extension,
            ReceiverKind::Method => dispatch,
        };

        match receiver {
            Some(param) => self.receiver.iter().all(|pred| pred(param)),
            None => self.kind == ReceiverKind::Any && self.receiver.is_empty(),
        }
    }
}

impl fmt::Debug for FunctionMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionMatcher")
            .field("kind", &self.kind)
            .field("receiver", &self.receiver.len())
            .field("fq_name", &self.fq_name.len())
            .field("parameters_size", &self.parameters_size.len())
            .field(
                "parameters",
                &self.parameters.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Fluent builder for [`FunctionMatcher`].
///
/// Each restriction adds one predicate; nothing replaces an earlier one.
pub struct FunctionMatcherBuilder {
    matcher: FunctionMatcher,
}

impl FunctionMatcherBuilder {
    /// Require the qualified name to satisfy `pred`.
    pub fn fq_name_restriction(
        mut self,
        pred: impl Fn(&FqName) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.matcher.fq_name.push(Box::new(pred));
        self
    }

    /// Require the value parameter count to satisfy `pred`.
    pub fn parameters_size_restriction(
        mut self,
        pred: impl Fn(usize) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.matcher.parameters_size.push(Box::new(pred));
        self
    }

    /// Require the value parameter at `index` to exist and satisfy `pred`.
    pub fn parameter_restriction(
        mut self,
        index: usize,
        pred: impl Fn(&IrValueParameter) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.matcher.parameters.push((index, Box::new(pred)));
        self
    }

    /// Require the receiver selected by the matcher's kind to satisfy `pred`.
    pub fn receiver_restriction(
        mut self,
        pred: impl Fn(&IrValueParameter) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.matcher.receiver.push(Box::new(pred));
        self
    }

    /// Freeze the matcher.
    ///
    /// # Errors
    ///
    /// [`MatcherError::ReceiverRestrictionWithoutReceiver`] if receiver
    /// predicates were registered for [`ReceiverKind::NoReceiver`].
    pub fn build(self) -> Result<FunctionMatcher, MatcherError> {
        let matcher = self.matcher;
        if matcher.kind == ReceiverKind::NoReceiver && !matcher.receiver.is_empty() {
            return Err(MatcherError::ReceiverRestrictionWithoutReceiver {
                count: matcher.receiver.len(),
            });
        }
        Ok(matcher)
    }
}
