fn main() {
    // Only link against the Node runtime when building the addon
    if std::env::var_os("CARGO_FEATURE_NODE").is_some() {
        napi_build::setup();
    }
}
