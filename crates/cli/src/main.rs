use jarsmith_api::JarsmithError;

fn main() {
    if let Err(e) = jarsmith_cli::run() {
        // the compiler already reported its own failure
        if let Some(JarsmithError::ExternalProcess(status)) = e.downcast_ref::<JarsmithError>() {
            std::process::exit(status.code().unwrap_or(1));
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
