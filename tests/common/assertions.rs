//! Custom assertion macros and utilities
//!
//! Provides assertion macros with more descriptive failure messages.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a result is an error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        assert!($result.is_err(), "Expected Err, got Ok");
    };
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected different error variant, got: {:?}", e),
        }
    };
}

/// Assert that a response is a JSON error with the given status and message
#[macro_export]
macro_rules! assert_error_response {
    ($response:expr, $status:expr, $message:expr) => {{
        let response = &$response;
        assert_eq!(response.status, $status, "unexpected status, body: {}", response.body);
        assert_eq!(response.body["error"], $message);
        assert_eq!(response.body["status"], $status.as_u16());
    }};
}
