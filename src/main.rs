use clap::Parser;
use psychrometric_toolbox::app::{self, Cli};

/// 프로그램의 엔트리 포인트. 로거를 초기화한 뒤 명령을 실행한다.
fn main() {
    env_logger::init();
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    app::run(cli)?;
    Ok(())
}
