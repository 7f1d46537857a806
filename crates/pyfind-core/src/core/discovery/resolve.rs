use pyfind_domain::{Mismatch, PythonInfo, PythonSpec};
use tracing::debug;

use super::propose::{Candidate, ProposeInterpreters};
use crate::effects::Effects;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolverState {
    NotStarted,
    Scanning,
    Found,
    Exhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Rejected {
        candidate: Candidate,
        mismatch: Mismatch,
    },
    Found(Candidate),
    Exhausted,
}

/// Single forward pass over a candidate sequence that stops at the first
/// candidate satisfying the request.
pub struct Resolver<'s, I> {
    spec: &'s PythonSpec,
    candidates: I,
    state: ResolverState,
    found: Option<Candidate>,
}

impl<'s, I> Resolver<'s, I>
where
    I: Iterator<Item = Candidate>,
{
    pub fn new(spec: &'s PythonSpec, candidates: I) -> Self {
        Self {
            spec,
            candidates,
            state: ResolverState::NotStarted,
            found: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> ResolverState {
        self.state
    }

    /// Evaluates one more candidate. Once a terminal state is reached the
    /// same answer is returned again without pulling from the sequence.
    pub fn step(&mut self) -> Step {
        match self.state {
            ResolverState::Found => {
                if let Some(candidate) = &self.found {
                    return Step::Found(candidate.clone());
                }
            }
            ResolverState::Exhausted => return Step::Exhausted,
            ResolverState::NotStarted | ResolverState::Scanning => {}
        }
        self.state = ResolverState::Scanning;
        let Some(candidate) = self.candidates.next() else {
            debug!(spec = %self.spec, "no candidate satisfies spec");
            self.state = ResolverState::Exhausted;
            return Step::Exhausted;
        };
        match candidate
            .info
            .mismatch(self.spec, candidate.strict_implementation_match)
        {
            Some(mismatch) => {
                debug!(
                    source = ?candidate.source,
                    path = %candidate.info.executable.display(),
                    %mismatch,
                    "candidate rejected"
                );
                Step::Rejected {
                    candidate,
                    mismatch,
                }
            }
            None => {
                debug!(
                    source = ?candidate.source,
                    path = %candidate.info.executable.display(),
                    "candidate accepted"
                );
                self.state = ResolverState::Found;
                self.found = Some(candidate.clone());
                Step::Found(candidate)
            }
        }
    }

    /// Runs to a terminal state and returns the accepted interpreter.
    pub fn resolve(mut self) -> Option<PythonInfo> {
        loop {
            match self.step() {
                Step::Rejected { .. } => {}
                Step::Found(candidate) => return Some(candidate.info),
                Step::Exhausted => return None,
            }
        }
    }
}

/// Resolves a raw interpreter request against the host described by
/// `effects`.
pub fn get_interpreter(raw: &str, effects: &dyn Effects) -> Option<PythonInfo> {
    let spec = PythonSpec::parse(raw);
    let candidates = ProposeInterpreters::new(&spec, effects);
    Resolver::new(&spec, candidates).resolve()
}
