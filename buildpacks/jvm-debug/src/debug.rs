//! Contribution of the JVM remote debugging launch configuration.
//!
//! The logic in this module only depends on narrow capabilities ([`BuildPlanQuery`],
//! [`LayerAccess`] and [`LaunchLayer`]) so it can be exercised without a real buildpack
//! environment. See the `layer` module for the libcnb backed implementations.

/// Name of the build plan entry that requests debugging.
pub(crate) const DEPENDENCY: &str = "debug";

/// Display label of the layer the profile script is written to.
pub(crate) const LAYER_LABEL: &str = "Debug";

/// Name of the launch profile script.
pub(crate) const PROFILE_NAME: &str = "debug";

pub(crate) const PORT_VARIABLE: &str = "BPL_DEBUG_PORT";
pub(crate) const DEFAULT_PORT: &str = "8000";
pub(crate) const SUSPEND_VARIABLE: &str = "BPL_DEBUG_SUSPEND";
pub(crate) const DEFAULT_SUSPEND: &str = "n";

/// Profile script sourced by the launcher before the application process starts.
///
/// Resolves the debug port and suspend flag from the environment and appends a JDWP agent
/// directive to `JAVA_OPTS`.
pub(crate) const PROFILE_SCRIPT: &str = r#"PORT=${BPL_DEBUG_PORT:=8000}
SUSPEND=${BPL_DEBUG_SUSPEND:=n}

printf "Debugging enabled on port ${PORT}"

if [[ "${SUSPEND}" = "y" ]]; then
  printf ", suspended on start\n"
else
  printf "\n"
fi

export JAVA_OPTS="${JAVA_OPTS} -agentlib:jdwp=transport=dt_socket,server=y,address=${PORT},suspend=${SUSPEND}"
"#;

/// Read-only view of the build plan.
pub(crate) trait BuildPlanQuery {
    /// Returns `true` if the plan contains an entry with the given name.
    fn has(&self, name: &str) -> bool;
}

/// A launch layer that profile scripts can be written to.
pub(crate) trait LaunchLayer {
    type Error;

    fn write_launch_profile(&self, name: &str, content: &str) -> Result<(), Self::Error>;

    /// Reports a launch time configuration option and its default value to the user.
    fn log_launch_configuration(&self, message: &str, default_value: &str);
}

/// Hands out (lazily materialized) launch layers.
pub(crate) trait LayerAccess {
    type Layer: LaunchLayer;

    fn helper_layer(&self, name: &str, label: &str) -> Self::Layer;
}

/// Identity of the buildpack performing the contribution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BuildpackInfo {
    pub(crate) id: String,
    pub(crate) version: String,
}

/// Debug configuration for a JVM application.
///
/// Only exists when the build plan requested debugging, see [`DebugConfig::from_build_plan`].
#[derive(Debug)]
pub(crate) struct DebugConfig<L> {
    info: BuildpackInfo,
    layer: L,
}

impl<L: LaunchLayer> DebugConfig<L> {
    /// Returns the debug configuration if the build plan contains a [`DEPENDENCY`] entry.
    ///
    /// Performs no I/O and no logging.
    pub(crate) fn from_build_plan<P, A>(plan: &P, info: BuildpackInfo, layers: &A) -> Option<Self>
    where
        P: BuildPlanQuery + ?Sized,
        A: LayerAccess<Layer = L> + ?Sized,
    {
        plan.has(DEPENDENCY).then(|| Self {
            info,
            layer: layers.helper_layer(DEPENDENCY, LAYER_LABEL),
        })
    }

    pub(crate) fn info(&self) -> &BuildpackInfo {
        &self.info
    }

    pub(crate) fn layer(&self) -> &L {
        &self.layer
    }

    /// Writes the debug profile script into the launch layer.
    ///
    /// Both configuration options are logged before the script is written, so they are
    /// reported even if writing fails.
    pub(crate) fn contribute(&self) -> Result<(), ContributionError<L::Error>> {
        self.layer.log_launch_configuration(
            &format!("Set ${PORT_VARIABLE} to configure"),
            DEFAULT_PORT,
        );
        self.layer.log_launch_configuration(
            &format!("Set ${SUSPEND_VARIABLE} to configure"),
            DEFAULT_SUSPEND,
        );

        self.layer
            .write_launch_profile(PROFILE_NAME, PROFILE_SCRIPT)
            .map_err(ContributionError::WriteProfile)
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ContributionError<E> {
    #[error("Unable to persist the profile script: {0}")]
    WriteProfile(#[source] E),
}
