// Concrete agent backends
pub mod agents;

// CLI argument definitions
pub mod cli;

// Per-run context store
pub mod context;

// Phase executors
pub mod phases;

// Final report rendering
pub mod report;

// Built-in tool catalog
pub mod tools;

// Workflow data types
pub mod types;

// Iteration controller
pub mod workflow;
