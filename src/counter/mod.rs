// ABOUTME: Guarded counter module - a linearizable integer accumulator.
// ABOUTME: Protects a shared count against concurrent read-modify-write races.

mod counter;

pub use counter::Counter;
