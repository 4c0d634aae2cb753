fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate gRPC code from proto files; the client is used by the
    // integration tests.
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile(&["../proto/authgate.proto"], &["../proto"])?;

    Ok(())
}
