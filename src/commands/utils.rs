use colored::Colorize;

pub fn log_info(msg: &str) {
    println!("{} {}", "[INFO]".blue().bold(), msg);
}

pub fn log_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

pub fn log_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

pub fn log_error(msg: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), msg);
}

/// Warn that the role filter matched nothing and every node was taken.
pub fn warn_fallback(role: &str) {
    log_warning(&format!(
        "No nodes with '{}' role found in CORAX_NODES. Using all nodes.",
        role
    ));
}
