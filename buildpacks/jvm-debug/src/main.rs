// Enable Clippy lints that are disabled by default.
// https://rust-lang.github.io/rust-clippy/stable/index.html
#![warn(clippy::pedantic)]

mod config;
mod debug;
mod errors;
mod layer;

use crate::debug::{BuildpackInfo, DebugConfig, DEPENDENCY};
use crate::errors::on_jvm_debug_buildpack_error;
use crate::layer::CnbLayers;
use libcnb::build::{BuildContext, BuildResult, BuildResultBuilder};
use libcnb::data::build_plan::{BuildPlan, BuildPlanBuilder};
use libcnb::detect::{DetectContext, DetectResult, DetectResultBuilder};
use libcnb::generic::{GenericMetadata, GenericPlatform};
use libcnb::{buildpack_main, Buildpack, Platform};
use libherokubuildpack::log::log_header;

pub(crate) use errors::JvmDebugBuildpackError;

// Suppress warnings due to the `unused_crate_dependencies` lint not handling integration tests well.
#[cfg(test)]
use libcnb_test as _;

pub(crate) struct JvmDebugBuildpack;

impl Buildpack for JvmDebugBuildpack {
    type Platform = GenericPlatform;
    type Metadata = GenericMetadata;
    type Error = JvmDebugBuildpackError;

    fn detect(&self, context: DetectContext<Self>) -> libcnb::Result<DetectResult, Self::Error> {
        DetectResultBuilder::pass()
            .build_plan(debug_build_plan(config::debug_requested(
                context.platform.env(),
            )))
            .build()
    }

    fn build(&self, context: BuildContext<Self>) -> libcnb::Result<BuildResult, Self::Error> {
        let info = BuildpackInfo::from(&context);
        let layers = CnbLayers::new(&context, info.clone());

        if let Some(debug_config) =
            DebugConfig::from_build_plan(&context.buildpack_plan, info, &layers)
        {
            log_header(format!(
                "{} {}",
                debug_config.layer().label(),
                debug_config.info().version
            ));

            debug_config
                .contribute()
                .map_err(JvmDebugBuildpackError::from)?;
        }

        BuildResultBuilder::new().build()
    }

    fn on_error(&self, error: libcnb::Error<Self::Error>) {
        libherokubuildpack::error::on_error(on_jvm_debug_buildpack_error, error);
    }
}

/// Always provides debugging, but only requires it when it was requested. The empty alternative
/// lets the buildpack pass detection when nothing requires debugging.
fn debug_build_plan(requested: bool) -> BuildPlan {
    if requested {
        BuildPlanBuilder::new()
            .provides(DEPENDENCY)
            .requires(DEPENDENCY)
            .build()
    } else {
        BuildPlanBuilder::new().provides(DEPENDENCY).or().build()
    }
}

buildpack_main!(JvmDebugBuildpack);
