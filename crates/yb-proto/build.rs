// ABOUTME: Build script for generating Rust code from ybapi.proto.
// ABOUTME: Compiles the log-streaming messages and the YbApiV2 client with tonic-build.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The CLI only ever talks to the control plane, never serves it
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(&["proto/ybapi.proto"], &["proto"])?;

    println!("cargo:rerun-if-changed=proto/ybapi.proto");

    Ok(())
}
