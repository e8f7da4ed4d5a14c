use crate::assets::loader::ImageLoader;
use crate::foundation::error::{CardError, CardResult};
use crate::pipeline::builtin::BuiltinModule;
use crate::pipeline::module::Module;
use crate::render::surface::Surface;
use crate::subject::Subject;

/// Progress of one pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineState {
    /// Not started.
    Idle,
    /// Executing step `step` (zero-based) of `of`.
    Running {
        /// Index of the current step.
        step: usize,
        /// Total number of steps.
        of: usize,
    },
    /// Every step finished.
    Done,
    /// Step `step` failed; steps before it have already drawn.
    Failed {
        /// Index of the failing step.
        step: usize,
    },
}

/// Ordered draw steps executed once against one surface.
#[derive(Debug)]
pub struct Pipeline {
    modules: Vec<Module>,
    state: PipelineState,
}

impl Pipeline {
    /// Build a pipeline from module references in execution order.
    pub fn new<I, M>(modules: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Module>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
            state: PipelineState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the pipeline has no steps.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Run every step in order, awaiting each before starting the next.
    ///
    /// A named step is resolved only when reached, so an unknown name fails with
    /// [`CardError::InvalidModule`] after earlier steps have drawn. A pipeline runs at most once.
    pub async fn run(
        &mut self,
        surface: &mut Surface,
        subject: &dyn Subject,
        loader: &dyn ImageLoader,
    ) -> CardResult<()> {
        if self.state != PipelineState::Idle {
            return Err(CardError::validation("pipeline has already run"));
        }

        let of = self.modules.len();
        for (step, module) in self.modules.iter().enumerate() {
            self.state = PipelineState::Running { step, of };
            tracing::trace!(step, of, module = module.describe(), "running module");

            if let Err(e) = run_step(module, surface, subject, loader).await {
                self.state = PipelineState::Failed { step };
                return Err(e);
            }
        }

        self.state = PipelineState::Done;
        Ok(())
    }
}

async fn run_step(
    module: &Module,
    surface: &mut Surface,
    subject: &dyn Subject,
    loader: &dyn ImageLoader,
) -> CardResult<()> {
    match module {
        Module::Named(name) => {
            let builtin =
                BuiltinModule::from_name(name).ok_or_else(|| CardError::invalid_module(name))?;
            builtin.apply(surface, subject, loader).await
        }
        Module::Callable(m) => m.draw(surface, subject, loader).await,
    }
}

/// Run `modules` once against `surface`.
pub async fn run_modules(
    modules: impl IntoIterator<Item = Module>,
    surface: &mut Surface,
    subject: &dyn Subject,
    loader: &dyn ImageLoader,
) -> CardResult<()> {
    Pipeline::new(modules).run(surface, subject, loader).await
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/runner.rs"]
mod tests;
