use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;

use crate::assets::loader::ImageLoader;
use crate::foundation::error::CardResult;
use crate::pipeline::builtin::BuiltinModule;
use crate::render::surface::Surface;
use crate::subject::Subject;

/// One caller-supplied draw step.
///
/// Steps run on the render's own task, one at a time, so implementations may hold `!Send` state
/// across awaits.
#[async_trait(?Send)]
pub trait CardModule {
    /// Name used in logs.
    fn name(&self) -> &str {
        "<callable>"
    }

    /// Draw onto `surface`. Drawing state left behind is visible to the next step.
    async fn draw(
        &self,
        surface: &mut Surface,
        subject: &dyn Subject,
        loader: &dyn ImageLoader,
    ) -> CardResult<()>;
}

/// Reference to a draw step: a built-in looked up by name when reached, or a callable.
#[derive(Clone)]
pub enum Module {
    /// Name of a built-in step. Unknown names fail only when the pipeline reaches them.
    Named(String),
    /// Caller-supplied step.
    Callable(Arc<dyn CardModule>),
}

impl Module {
    /// Wrap a synchronous closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut Surface, &dyn Subject) -> CardResult<()> + 'static,
    {
        Self::Callable(Arc::new(FnModule(f)))
    }

    /// Wrap a closure returning a boxed local future.
    pub fn from_async_fn<F>(f: F) -> Self
    where
        F: for<'a> Fn(
                &'a mut Surface,
                &'a dyn Subject,
                &'a dyn ImageLoader,
            ) -> LocalBoxFuture<'a, CardResult<()>>
            + 'static,
    {
        Self::Callable(Arc::new(AsyncFnModule(f)))
    }

    /// Name used in logs and errors.
    pub fn describe(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Callable(m) => m.name(),
        }
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Self::Callable(m) => f.debug_tuple("Callable").field(&m.name()).finish(),
        }
    }
}

impl From<&str> for Module {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

impl From<String> for Module {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<BuiltinModule> for Module {
    fn from(module: BuiltinModule) -> Self {
        Self::Named(module.name().to_owned())
    }
}

impl From<Arc<dyn CardModule>> for Module {
    fn from(module: Arc<dyn CardModule>) -> Self {
        Self::Callable(module)
    }
}

impl<'de> serde::Deserialize<'de> for Module {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::Named)
    }
}

struct FnModule<F>(F);

#[async_trait(?Send)]
impl<F> CardModule for FnModule<F>
where
    F: Fn(&mut Surface, &dyn Subject) -> CardResult<()>,
{
    async fn draw(
        &self,
        surface: &mut Surface,
        subject: &dyn Subject,
        _loader: &dyn ImageLoader,
    ) -> CardResult<()> {
        (self.0)(surface, subject)
    }
}

struct AsyncFnModule<F>(F);

#[async_trait(?Send)]
impl<F> CardModule for AsyncFnModule<F>
where
    F: for<'a> Fn(
        &'a mut Surface,
        &'a dyn Subject,
        &'a dyn ImageLoader,
    ) -> LocalBoxFuture<'a, CardResult<()>>,
{
    async fn draw(
        &self,
        surface: &mut Surface,
        subject: &dyn Subject,
        loader: &dyn ImageLoader,
    ) -> CardResult<()> {
        (self.0)(surface, subject, loader).await
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/module.rs"]
mod tests;
