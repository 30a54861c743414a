//! Command-line configuration
use clap::Parser;
use spin3d_core::Demo;

#[derive(Parser, Debug, Clone)]
#[command(name = "spin3d-terminal")]
#[command(about = "Spin a box or a polyline in the terminal", long_about = None)]
pub struct Cli {
    /// Which primitive to spin: "box" or "line"
    #[arg(long, default_value_t = Demo::Box)]
    pub demo: Demo,

    /// Target frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Exit after this many frames instead of running until Q is pressed
    #[arg(long)]
    pub frames: Option<u64>,

    /// Log filter in env_logger syntax, overriding RUST_LOG
    #[arg(long)]
    pub log: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["spin3d-terminal"]).unwrap();
        assert_eq!(cli.demo, Demo::Box);
        assert_eq!(cli.fps, 60);
        assert_eq!(cli.frames, None);
    }

    #[test]
    fn test_line_demo_with_frame_limit() {
        let cli =
            Cli::try_parse_from(["spin3d-terminal", "--demo", "line", "--frames", "50"]).unwrap();
        assert_eq!(cli.demo, Demo::Line);
        assert_eq!(cli.frames, Some(50));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["spin3d-terminal", "--demo", "torus"]).is_err());
        assert!(Cli::try_parse_from(["spin3d-terminal", "--fps", "0"]).is_err());
    }
}
