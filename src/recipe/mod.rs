//! Container build recipes.
//!
//! A recipe starts from a base image, stages the Python dependency manifest,
//! installs it, and optionally embeds the application with a default command.
//! The manifest is copied and installed before any application code so that
//! the install layer stays cached while only the code changes.

pub mod image;
pub mod instruction;

pub use image::BaseImage;
pub use instruction::Instruction;

use crate::utils::error::{PrecioLuzError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_MANIFEST: &str = "requirements.txt";
pub const DEFAULT_SCRIPT: &str = "precio_luz.py";
pub const DEFAULT_WORKDIR: &str = "/app";

const HOME_ASSISTANT_IMAGE: &str = "ghcr.io/home-assistant/home-assistant";
const STAGED_MANIFEST_DIR: &str = "/tmp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Variant {
    /// Home Assistant pinned to a release; dependencies only.
    HomeAssistantPinned,
    /// Home Assistant on the `stable` channel; dependencies only.
    HomeAssistantStable,
    /// Slim Python runtime with the script embedded as the default command.
    PythonSlim,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::HomeAssistantPinned,
        Variant::HomeAssistantStable,
        Variant::PythonSlim,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::HomeAssistantPinned => "home-assistant-pinned",
            Variant::HomeAssistantStable => "home-assistant-stable",
            Variant::PythonSlim => "python-slim",
        }
    }

    fn base_reference(&self) -> (&'static str, &'static str) {
        match self {
            Variant::HomeAssistantPinned => (HOME_ASSISTANT_IMAGE, "2026.2.2"),
            Variant::HomeAssistantStable => (HOME_ASSISTANT_IMAGE, "stable"),
            Variant::PythonSlim => ("python", "3.13-slim"),
        }
    }

    fn embeds_app(&self) -> bool {
        matches!(self, Variant::PythonSlim)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = PrecioLuzError;

    fn from_str(s: &str) -> Result<Self> {
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| PrecioLuzError::RecipeError {
                message: format!(
                    "unknown variant '{}'; expected one of: {}",
                    s,
                    Variant::ALL.map(|v| v.name()).join(", ")
                ),
            })
    }
}

/// Where the application lives in the image and what runs on container start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLayout {
    pub workdir: String,
    pub command: Vec<String>,
}

impl AppLayout {
    pub fn python_script(workdir: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            workdir: workdir.into(),
            command: vec!["python".to_string(), script.into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecipe {
    base: BaseImage,
    manifest: String,
    app: Option<AppLayout>,
}

impl ContainerRecipe {
    pub fn new(base: BaseImage, manifest: impl Into<String>) -> Self {
        Self {
            base,
            manifest: manifest.into(),
            app: None,
        }
    }

    pub fn for_variant(variant: Variant) -> Result<Self> {
        let (repository, tag) = variant.base_reference();
        let recipe = Self::new(BaseImage::new(repository, tag)?, DEFAULT_MANIFEST);
        Ok(if variant.embeds_app() {
            recipe.with_app(AppLayout::python_script(DEFAULT_WORKDIR, DEFAULT_SCRIPT))
        } else {
            recipe
        })
    }

    pub fn with_app(mut self, app: AppLayout) -> Self {
        self.app = Some(app);
        self
    }

    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Replaces the script of the default `python <script>` command, if there is one.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        if let Some(app) = self.app.as_mut() {
            app.command = vec!["python".to_string(), script.into()];
        }
        self
    }

    pub fn base(&self) -> &BaseImage {
        &self.base
    }

    pub fn manifest(&self) -> &str {
        &self.manifest
    }

    pub fn entrypoint(&self) -> Option<&[String]> {
        self.app.as_ref().map(|app| app.command.as_slice())
    }

    fn staged_manifest(&self) -> String {
        let file_name = Path::new(&self.manifest)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.manifest);
        match &self.app {
            Some(_) => file_name.to_string(),
            None => format!("{}/{}", STAGED_MANIFEST_DIR, file_name),
        }
    }

    fn install_command(&self) -> String {
        format!("pip install --no-cache-dir -r {}", self.staged_manifest())
    }

    /// Directives up to and including the dependency install. Nothing about the
    /// application code or the default command feeds into these.
    pub fn dependency_layers(&self) -> Vec<Instruction> {
        let mut layers = vec![Instruction::From(self.base.clone())];
        let dest = match &self.app {
            Some(app) => {
                layers.push(Instruction::Workdir(app.workdir.clone()));
                ".".to_string()
            }
            None => self.staged_manifest(),
        };
        layers.push(Instruction::Copy {
            src: self.manifest.clone(),
            dest,
        });
        layers.push(Instruction::Run(self.install_command()));
        layers
    }

    pub fn instructions(&self) -> Vec<Instruction> {
        let mut instructions = self.dependency_layers();
        if let Some(app) = &self.app {
            instructions.push(Instruction::Copy {
                src: ".".to_string(),
                dest: ".".to_string(),
            });
            instructions.push(Instruction::Cmd(app.command.clone()));
        }
        instructions
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;

        check_build_path("dependency manifest", &self.manifest)?;

        if let Some(app) = &self.app {
            check_build_path("working directory", &app.workdir)?;
            if !app.workdir.starts_with('/') {
                return Err(PrecioLuzError::RecipeError {
                    message: format!("working directory '{}' must be absolute", app.workdir),
                });
            }
            if app.command.is_empty() || app.command.iter().any(|arg| arg.is_empty()) {
                return Err(PrecioLuzError::RecipeError {
                    message: "default command must be non-empty".to_string(),
                });
            }
        }

        check_build_order(&self.instructions(), &self.manifest)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for instruction in self.instructions() {
            out.push_str(&instruction.to_string());
            out.push('\n');
        }
        out
    }

    /// Validates, then writes the rendered Dockerfile to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        std::fs::write(path.as_ref(), self.render())?;
        tracing::debug!("Wrote recipe to {}", path.as_ref().display());
        Ok(())
    }
}

/// One line per variant: name, base image and default command (`-` for none).
pub fn variant_table() -> Result<String> {
    let mut out = String::new();
    for variant in Variant::ALL {
        let recipe = ContainerRecipe::for_variant(variant)?;
        let entrypoint = recipe
            .entrypoint()
            .map(|cmd| cmd.join(" "))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:<24} {:<52} {}\n",
            variant.name(),
            recipe.base().to_string(),
            entrypoint
        ));
    }
    Ok(out)
}

/// Paths are written unquoted into `COPY`, `WORKDIR` and the shell-form
/// `RUN`, so only plain path characters are accepted.
fn check_build_path(what: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PrecioLuzError::RecipeError {
            message: format!("{} path is empty", what),
        });
    }
    if let Some(bad) = path
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '+' | '@')))
    {
        return Err(PrecioLuzError::RecipeError {
            message: format!("{} path {:?} contains unsupported character {:?}", what, path, bad),
        });
    }
    Ok(())
}

/// Checks the layering rules: `FROM` first, the manifest copied before the
/// install, application code copied after it, and `CMD` last.
pub fn check_build_order(instructions: &[Instruction], manifest: &str) -> Result<()> {
    let out_of_order = |message: &str| PrecioLuzError::RecipeError {
        message: message.to_string(),
    };

    if !matches!(instructions.first(), Some(Instruction::From(_))) {
        return Err(out_of_order("recipe must start with FROM"));
    }

    let manifest_copy = instructions
        .iter()
        .position(|i| matches!(i, Instruction::Copy { src, .. } if src == manifest));
    let install = instructions
        .iter()
        .position(|i| matches!(i, Instruction::Run(cmd) if cmd.starts_with("pip install")));
    let app_copy = instructions
        .iter()
        .position(|i| matches!(i, Instruction::Copy { src, .. } if src == "."));
    let cmd = instructions
        .iter()
        .position(|i| matches!(i, Instruction::Cmd(_)));

    let (manifest_copy, install) = match (manifest_copy, install) {
        (Some(copy), Some(install)) => (copy, install),
        _ => return Err(out_of_order("recipe must copy and install the dependency manifest")),
    };
    if manifest_copy > install {
        return Err(out_of_order("dependency manifest must be copied before installing"));
    }
    if let Some(app_copy) = app_copy {
        if app_copy < install {
            return Err(out_of_order(
                "application code must be copied after installing dependencies",
            ));
        }
    }
    if let Some(cmd) = cmd {
        if cmd != instructions.len() - 1 {
            return Err(out_of_order("CMD must be the last directive"));
        }
    }
    Ok(())
}
