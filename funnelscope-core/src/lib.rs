pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod conf;
pub mod elb;
pub mod logging;
pub mod report;
pub mod scan;

#[cfg(test)]
mod test_helpers;
