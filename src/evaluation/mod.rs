//! Route cost evaluation and solution verification.

mod evaluator;

pub use evaluator::RouteEvaluator;
