use crate::debug::ContributionError;
use crate::layer::LaunchLayerError;
use libherokubuildpack::log::log_error;

#[derive(Debug)]
pub(crate) enum JvmDebugBuildpackError {
    Contribution(ContributionError<LaunchLayerError>),
}

impl From<ContributionError<LaunchLayerError>> for JvmDebugBuildpackError {
    fn from(error: ContributionError<LaunchLayerError>) -> Self {
        Self::Contribution(error)
    }
}

impl From<JvmDebugBuildpackError> for libcnb::Error<JvmDebugBuildpackError> {
    fn from(error: JvmDebugBuildpackError) -> Self {
        Self::BuildpackError(error)
    }
}

pub(crate) fn on_jvm_debug_buildpack_error(error: JvmDebugBuildpackError) {
    match error {
        JvmDebugBuildpackError::Contribution(error) => log_error(
            "Unable to configure debugging",
            format!("{error}\n\nThe debug launch profile could not be written to its layer."),
        ),
    }
}
