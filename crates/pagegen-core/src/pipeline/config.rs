/// Identifier the generated view uses for its state-holder parameter.
pub const DEFAULT_BINDING_NAME: &str = "viewModel";

/// Options shared by state-holder and view lowering.
///
/// The default uses binding name `viewModel`, no package line, and no
/// strict cross-reference checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Name the view uses to reference the state holder at call sites.
    pub binding_name: String,
    /// Package declared at the top of both artifacts, if any.
    pub package: Option<String>,
    /// When enabled, action targets and `page.` references must name
    /// declared members of the page.
    pub strict: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            binding_name: DEFAULT_BINDING_NAME.to_string(),
            package: None,
            strict: false,
        }
    }
}

impl GenerateConfig {
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_binding_name(mut self, binding_name: impl Into<String>) -> Self {
        self.binding_name = binding_name.into();
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
