use std::{collections::BTreeMap, fmt, io, sync::Arc};

#[derive(Debug, Clone)]
pub struct GlbError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<GlbCause>,
}

#[derive(Debug, Clone)]
pub enum GlbCause {
    Glb(Box<GlbError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl GlbError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    pub fn push_glb(mut self, cause: GlbError) -> Self {
        self.causes.push(GlbCause::Glb(Box::new(cause)));
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(GlbCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for GlbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for GlbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            GlbCause::Glb(e) => Some(e.as_ref() as &dyn std::error::Error),
            GlbCause::Std(e) => Some(e.as_ref()),
        })
    }
}

impl From<String> for GlbError {
    fn from(s: String) -> Self {
        GlbError::new("string-error").with_arg("msg", s)
    }
}

impl From<io::Error> for GlbError {
    fn from(err: io::Error) -> Self {
        GlbError::new("io-error").push_std(err)
    }
}

impl From<wgpu::CreateSurfaceError> for GlbError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        GlbError::new("wgpu::CreateSurfaceError").push_std(err)
    }
}

impl From<wgpu::RequestAdapterError> for GlbError {
    fn from(err: wgpu::RequestAdapterError) -> Self {
        GlbError::new("wgpu::RequestAdapterError").push_std(err)
    }
}

impl From<wgpu::RequestDeviceError> for GlbError {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        GlbError::new("wgpu::RequestDeviceError").push_std(err)
    }
}

impl From<winit::error::EventLoopError> for GlbError {
    fn from(err: winit::error::EventLoopError) -> Self {
        GlbError::new("winit::error::EventLoopError").push_std(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_key_and_sorted_args() {
        let err = GlbError::new("load-failed")
            .with_arg("path", "model.glb")
            .with_arg("attempt", 1);
        assert_eq!(format!("{err}"), "load-failed(attempt=1, path=model.glb)");
    }

    #[test]
    fn source_walks_to_first_cause() {
        let io = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = GlbError::from(io);
        assert_eq!(err.key, "io-error");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn nested_glb_cause_is_reported_as_source() {
        let inner = GlbError::new("inner");
        let outer = GlbError::new("outer").push_glb(inner);
        let source = std::error::Error::source(&outer).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("inner()"));
    }
}
