use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::io::gateway::{Gateway, GatewayError};

/// In-memory gateway that serves canned responses and records every path
/// it is asked for. Unknown paths answer HTTP 404.
#[derive(Default)]
pub struct FakeGateway {
    responses: HashMap<String, Value>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, value: Value) -> Self {
        self.responses.insert(path.to_string(), value);
        self
    }

    /// Shared handle to the call log, usable after the gateway is boxed.
    pub fn calls(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.calls)
    }
}

impl Gateway for FakeGateway {
    fn get_json(&self, path: &str) -> Result<Value, GatewayError> {
        self.calls.borrow_mut().push(path.to_string());
        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| GatewayError::Status {
                path: path.to_string(),
                status: 404,
                body: "not found".to_string(),
            })
    }
}
