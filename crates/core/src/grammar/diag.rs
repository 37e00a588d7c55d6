pub use ldap_syntax_diagnostics::{Diagnostic, Severity, Span, codes, explain};
