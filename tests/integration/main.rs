mod error_handling;
mod scheduler_examples;
mod session_flows;
