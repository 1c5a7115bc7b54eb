use twolink::GlobalConfig;

#[derive(Clone, Debug)]
pub(crate) struct PlayerConfig {
    /// Runtime configuration.
    pub runtime: twolink::Config,
    /// Trace output file.
    pub trace: Option<std::path::PathBuf>,
    /// Input script.
    pub input: Option<std::path::PathBuf>,
    /// Initial scrub position.
    pub scrub: Option<f32>,
    /// Global configuration.
    pub global: GlobalConfig,
}
