//! Output rendering. The periodics document goes through an explicit
//! `Template`; the test-group document is plain YAML with a header comment.

pub mod template;

pub use template::{Template, render_test_groups};
