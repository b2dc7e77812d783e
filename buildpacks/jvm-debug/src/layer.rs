use crate::debug::{BuildPlanQuery, BuildpackInfo, LaunchLayer, LayerAccess};
use crate::{JvmDebugBuildpack, JvmDebugBuildpackError};
use libcnb::build::BuildContext;
use libcnb::data::buildpack_plan::BuildpackPlan;
use libcnb::data::layer::{LayerName, LayerNameError};
use libcnb::layer::UncachedLayerDefinition;
use libherokubuildpack::log::log_info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::Permissions;
use std::os::unix::fs::PermissionsExt;

impl BuildPlanQuery for BuildpackPlan {
    fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }
}

impl From<&BuildContext<JvmDebugBuildpack>> for BuildpackInfo {
    fn from(context: &BuildContext<JvmDebugBuildpack>) -> Self {
        let buildpack = &context.buildpack_descriptor.buildpack;

        BuildpackInfo {
            id: buildpack.id.to_string(),
            version: buildpack.version.to_string(),
        }
    }
}

/// Metadata recorded alongside the launch layer, identifying the buildpack that wrote it.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct DebugLayerMetadata {
    pub(crate) buildpack_id: String,
    pub(crate) buildpack_version: String,
}

impl From<&BuildpackInfo> for DebugLayerMetadata {
    fn from(info: &BuildpackInfo) -> Self {
        DebugLayerMetadata {
            buildpack_id: info.id.clone(),
            buildpack_version: info.version.clone(),
        }
    }
}

/// Hands out launch layers backed by the layers directory of a libcnb build.
///
/// Every layer records `info` as its metadata.
pub(crate) struct CnbLayers<'a> {
    context: &'a BuildContext<JvmDebugBuildpack>,
    info: BuildpackInfo,
}

impl<'a> CnbLayers<'a> {
    pub(crate) fn new(context: &'a BuildContext<JvmDebugBuildpack>, info: BuildpackInfo) -> Self {
        CnbLayers { context, info }
    }
}

impl<'a> LayerAccess for CnbLayers<'a> {
    type Layer = CnbHelperLayer<'a>;

    fn helper_layer(&self, name: &str, label: &str) -> Self::Layer {
        CnbHelperLayer {
            context: self.context,
            info: self.info.clone(),
            name: name.to_string(),
            label: label.to_string(),
        }
    }
}

/// A launch-only layer that is created on disk the first time a profile script is written.
pub(crate) struct CnbHelperLayer<'a> {
    context: &'a BuildContext<JvmDebugBuildpack>,
    info: BuildpackInfo,
    name: String,
    label: String,
}

impl CnbHelperLayer<'_> {
    pub(crate) fn label(&self) -> &str {
        &self.label
    }
}

impl LaunchLayer for CnbHelperLayer<'_> {
    type Error = LaunchLayerError;

    fn write_launch_profile(&self, name: &str, content: &str) -> Result<(), Self::Error> {
        let layer_name = self.name.parse::<LayerName>()?;

        let layer_ref = self
            .context
            .uncached_layer(
                layer_name,
                UncachedLayerDefinition {
                    build: false,
                    launch: true,
                },
            )
            .map_err(|error| LaunchLayerError::CreateLayer(Box::new(error)))?;

        layer_ref
            .write_metadata(DebugLayerMetadata::from(&self.info))
            .map_err(|error| LaunchLayerError::WriteMetadata(Box::new(error)))?;

        let profile_dir = layer_ref.path().join("profile.d");
        fs::create_dir_all(&profile_dir)?;

        let profile_path = profile_dir.join(name);
        fs::write(&profile_path, content)?;
        fs::set_permissions(&profile_path, Permissions::from_mode(0o755))?;

        Ok(())
    }

    fn log_launch_configuration(&self, message: &str, default_value: &str) {
        log_info(format!("    {message}. Default {default_value}"));
    }
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum LaunchLayerError {
    #[error("Invalid layer name: {0}")]
    InvalidLayerName(#[from] LayerNameError),
    #[error("Couldn't create launch layer: {0}")]
    CreateLayer(Box<libcnb::Error<JvmDebugBuildpackError>>),
    #[error("Couldn't write launch layer metadata: {0}")]
    WriteMetadata(Box<libcnb::Error<JvmDebugBuildpackError>>),
    #[error("Couldn't write profile script: {0}")]
    Io(#[from] std::io::Error),
}
