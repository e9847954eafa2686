// Caller side of the engine: CLI, config, logging, saved-analysis history.

// Core infrastructure
pub mod conf;
pub mod runtime;

// Persistence
pub mod history;

// Front end
pub mod cli;
pub mod command;
pub mod report;
