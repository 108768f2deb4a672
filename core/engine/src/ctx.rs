//! The shared context threaded through one evaluation: the arena, the
//! environment, and the recursion-depth tracker.

use crate::depth::DepthTracker;
use crate::env::Env;
use jexpr_arena::Arena;

pub struct Ctx<'a> {
    pub arena: &'a Arena,
    pub env: &'a Env<'a>,
    pub depth: DepthTracker,
}

impl<'a> Ctx<'a> {
    pub fn new(arena: &'a Arena, env: &'a Env<'a>) -> Self {
        Self {
            arena,
            env,
            depth: DepthTracker::new(env.max_depth()),
        }
    }
}
