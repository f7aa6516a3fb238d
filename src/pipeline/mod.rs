//! Request processing stages
//!
//! A validated request flows strictly in order: [`dispatch`] resolves the agent
//! and invokes it with [`normalize`]d messages, then [`assemble`] builds the
//! task from the complete result.

pub mod assemble;
pub mod dispatch;
pub mod identity;
pub mod normalize;

pub use assemble::TaskAssembler;
pub use dispatch::{Dispatched, Dispatcher};
pub use identity::{
    Clock, DefaultClock, FixedClock, IdGenerator, SequentialIdGenerator, SharedClock,
    UuidV7Generator,
};
