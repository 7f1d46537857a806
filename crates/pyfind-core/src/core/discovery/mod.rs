//! Interpreter discovery: propose candidates in priority order, accept the
//! first one that satisfies the request.

pub mod builtin;
pub mod propose;
pub mod resolve;

pub use builtin::{
    Builtin, Discover, DiscoveryOptions, EvaluatedCandidate, Explanation, FALLBACK_SPEC,
};
pub use propose::{Candidate, CandidateSource, ProposeInterpreters};
pub use resolve::{get_interpreter, Resolver, ResolverState, Step};
