//! Script runtime management
//!
//! One QuickJS runtime per engine. Compiling and running are separate steps so
//! a script that is not valid code never gets to execute anything.

use crate::error::{CompileError, Diagnostic, ScriptError, Thrown};
use crate::ffi::{self, Harvester};
use crate::global::ScriptGlobal;
use rquickjs::{
    CatchResultExt, CaughtError, Context, Function, Module, Persistent, Runtime, Value,
};
use scriptcfg_services::ScriptSource;
use std::marker::PhantomData;
use std::path::PathBuf;

/// Lines the `Function` constructor puts in front of the body
const BODY_LINE_OFFSET: i32 = 2;

/// Script execution context
pub struct ScriptEngine {
    #[allow(dead_code)] // Kept alive for context lifetime
    runtime: Runtime,
    context: Context,
}

/// A compiled script, runnable once on the engine that compiled it
pub struct CompiledUnit<'engine, G> {
    path: PathBuf,
    function: Persistent<Function<'static>>,
    _engine: PhantomData<&'engine ScriptEngine>,
    _global: PhantomData<fn(&mut G)>,
}

impl<G> CompiledUnit<'_, G> {
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ScriptEngine {
    pub fn new() -> Result<Self, ScriptError> {
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;

        Ok(Self { runtime, context })
    }

    /// Compile `source` against the global contract `G`.
    ///
    /// The text is first parsed on its own as module code, which evaluates
    /// nothing. It then becomes the body of a function whose only parameter is
    /// `G::NAME`; a body that parses standalone cannot close that function
    /// early, so building it evaluates none of the script.
    pub fn compile<'e, G: ScriptGlobal>(
        &'e self,
        source: &ScriptSource,
    ) -> Result<CompiledUnit<'e, G>, ScriptError> {
        self.context.with(|ctx| -> Result<CompiledUnit<'e, G>, ScriptError> {
            Module::declare(
                ctx.clone(),
                source.path.display().to_string(),
                source.text.as_str(),
            )
            .catch(&ctx)
            .map_err(|caught| compile_failure(source, caught, 0))?;

            // Script code reads `<!--` and `-->` as comments, module code does not.
            if let Some(line) = html_comment_line(&source.text) {
                return Err(ScriptError::Compile(CompileError {
                    path: source.path.clone(),
                    diagnostics: vec![Diagnostic {
                        message: "HTML-like comments are not allowed".to_string(),
                        line: Some(line),
                    }],
                }));
            }

            let constructor: Function = ctx.globals().get("Function")?;
            let function = constructor
                .call::<_, Function>((G::NAME, source.text.as_str()))
                .catch(&ctx)
                .map_err(|caught| compile_failure(source, caught, BODY_LINE_OFFSET))?;

            tracing::debug!(path = %source.path.display(), "compiled script");

            Ok(CompiledUnit {
                path: source.path.clone(),
                function: Persistent::save(&ctx, function),
                _engine: PhantomData,
                _global: PhantomData,
            })
        })
    }

    /// Run `unit` once with `global` bound under `G::NAME`.
    ///
    /// On success `global` holds exactly what the script left on the binding.
    /// On failure `global` is left untouched.
    pub fn run<G: ScriptGlobal>(
        &self,
        unit: CompiledUnit<'_, G>,
        global: &mut G,
    ) -> Result<(), ScriptError> {
        let path = unit.path;

        let entries = self.context.with(|ctx| -> Result<_, ScriptError> {
            let function = unit.function.restore(&ctx)?;
            let harvester = Harvester::new(&ctx)?;
            let binding = ffi::seed_object(&ctx, global.seed())?;

            function
                .call::<_, Value>((binding.clone(),))
                .catch(&ctx)
                .map_err(|caught| match caught {
                    CaughtError::Error(err) => ScriptError::from(err),
                    caught => ScriptError::Execution(Thrown::from_caught(caught).into()),
                })?;

            harvester.harvest(&binding)
        })?;

        tracing::debug!(path = %path.display(), entries = entries.len(), "ran script");
        global.absorb(entries);
        Ok(())
    }
}

fn html_comment_line(text: &str) -> Option<u32> {
    text.lines()
        .position(|line| line.contains("<!--") || line.contains("-->"))
        .and_then(|index| u32::try_from(index + 1).ok())
}

/// Turn a syntax error into a `CompileError`; `line_offset` is the number of
/// wrapper lines in front of the script text.
fn compile_failure(
    source: &ScriptSource,
    caught: CaughtError<'_>,
    line_offset: i32,
) -> ScriptError {
    if let CaughtError::Error(err) = caught {
        return ScriptError::from(err);
    }

    let thrown = Thrown::from_caught(caught);
    let line = thrown
        .line
        .and_then(|line| u32::try_from(line - line_offset).ok())
        .filter(|line| *line > 0);

    ScriptError::Compile(CompileError {
        path: source.path.clone(),
        diagnostics: vec![Diagnostic {
            message: thrown.message,
            line,
        }],
    })
}
