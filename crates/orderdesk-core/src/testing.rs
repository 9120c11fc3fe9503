//! Testing helpers and mock utilities.
//!
//! Provides convenient constructors for mocked panel backends.

use crate::panel::{MockPanelApi, PanelResponse};

/// Create a mock panel that answers every call with `body`.
///
/// # Example
///
/// ```rust,ignore
/// use orderdesk_core::testing::mock_panel_replying;
///
/// let panel = mock_panel_replying(r#"{"balance":"1.00"}"#);
/// ```
#[must_use]
pub fn mock_panel_replying(body: &'static str) -> MockPanelApi {
    let mut mock = MockPanelApi::new();
    mock.expect_call()
        .returning(move |_| PanelResponse::parse(body));
    mock
}

/// Create a mock panel that must never be called.
#[must_use]
pub fn mock_panel_unused() -> MockPanelApi {
    let mut mock = MockPanelApi::new();
    mock.expect_call().never();
    mock
}
