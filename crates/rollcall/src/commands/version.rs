pub fn run() -> anyhow::Result<()> {
    println!("rollcall {}", env!("CARGO_PKG_VERSION"));
    println!("Meeting attendance analytics: occupancy, durations and sessions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_output() {
        let result = run();
        assert!(result.is_ok());
    }
}
