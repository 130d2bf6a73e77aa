//! Integration tests for keyledger.
//!
//! The pipeline tests run against the in-memory source and need nothing
//! external. The AWS tests require LocalStack to be running and are marked
//! `#[ignore]`.
//!
//! ## Running the AWS Tests
//!
//! 1. Start LocalStack:
//!    ```bash
//!    docker run -d -p 4566:4566 localstack/localstack
//!    ```
//!
//! 2. Run the ignored tests:
//!    ```bash
//!    LOCALSTACK_ENDPOINT=http://localhost:4566 cargo test -p integration-tests -- --ignored
//!    ```

mod aws_test;
mod common;
mod export_test;
mod pipeline_test;
