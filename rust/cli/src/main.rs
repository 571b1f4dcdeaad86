use holdem_service::LogFormat;
use std::io;

fn main() {
    // tracing output only with RUST_LOG set
    if std::env::var_os("RUST_LOG").is_some() {
        let format = match std::env::var("HOLDEM_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        holdem_service::init_logging_with(format);
    }
    let code = holdem_cli::run(std::env::args(), &mut io::stdout(), &mut io::stderr());
    std::process::exit(code);
}
