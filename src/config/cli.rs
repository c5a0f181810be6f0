use clap::Parser;

/// 預約參數一律由環境變數提供，CLI 只控制輸出
#[derive(Debug, Clone, Parser)]
#[command(name = "cult-class-booker")]
#[command(about = "Books a fitness class slot through the cult.fit API, retrying until a slot is secured")]
pub struct CliArgs {
    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}
