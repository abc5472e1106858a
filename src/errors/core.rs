use std::fmt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use backtrace::Backtrace;

use super::ErrorKind;

static DEBUG_OUTPUT: AtomicBool = AtomicBool::new(false);

pub fn set_debug_output(enabled: bool) {
    DEBUG_OUTPUT.store(enabled, Ordering::SeqCst);
}

fn debug_output() -> bool {
    DEBUG_OUTPUT.load(Ordering::SeqCst)
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    backtrace: Backtrace,
    context: HashMap<String, String>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: String::new(),
            source: None,
            backtrace: Backtrace::new(),
            context: HashMap::new(),
        }
    }

    pub fn wrap(
        source: impl std::error::Error + Send + Sync + 'static,
        kind: ErrorKind,
    ) -> Self {
        Self {
            kind,
            message: String::new(),
            source: Some(Box::new(source)),
            backtrace: Backtrace::new(),
            context: HashMap::new(),
        }
    }

    pub fn with_msg(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_ctx(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    pub fn get_ctx(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(|s| s.as_str())
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn msg(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.kind)?;

        match (&self.message.is_empty(), &self.source) {
            (false, Some(source)) => write!(f, " {} {}", self.message, source)?,
            (false, None) => write!(f, " {}", self.message)?,
            (true, Some(source)) => write!(f, " {}", source)?,
            (true, None) => {},
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "[{}]", self.kind)?;
        } else {
            write!(f, "[{}] {}", self.kind, self.message)?;
        }

        if !self.context.is_empty() {
            write!(f, "\nContext:")?;
            let mut keys: Vec<_> = self.context.keys().collect();
            keys.sort();
            for key in keys {
                write!(f, "\n  {}: {}", key, self.context[key])?;
            }
        }

        if let Some(source) = &self.source {
            write!(f, "\nSource: {:?}", source)?;
        }

        if debug_output() {
            writeln!(f, "\nBacktrace:")?;
            write!(f, "{:?}", self.backtrace)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_message_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e = Error::wrap(io, ErrorKind::Read)
            .with_msg("config: Failed to read file");

        assert_eq!(e.to_string(), "[Read] config: Failed to read file missing");
        assert!(e.is_kind(ErrorKind::Read));
        assert!(std::error::Error::source(&e).is_some());
    }

    #[test]
    fn debug_lists_context_sorted() {
        let e = Error::new(ErrorKind::Invalid)
            .with_msg("config: Idle window must be positive")
            .with_ctx("path", "/tmp/a.conf")
            .with_ctx("idle_ms", 0);

        assert_eq!(e.get_ctx("idle_ms"), Some("0"));
        let rendered = format!("{:?}", e);
        assert!(rendered.starts_with("[Invalid] config: Idle window must be positive"));
        let idle = rendered.find("idle_ms: 0").unwrap();
        let path = rendered.find("path: /tmp/a.conf").unwrap();
        assert!(idle < path);
    }

    #[test]
    fn display_without_message() {
        assert_eq!(Error::new(ErrorKind::Parse).to_string(), "[Parse]");
    }
}
