// ==========================================
// Mandi 供应链智能引擎 - 命令行入口
// ==========================================
// 用法:
//   mandi-supply-chain [--db <path>] [--user <user_id>] <command> [args...]
//
// 命令:
//   overview [lat lng]                       库存 / 吞吐量概览
//   stress [lat lng]                         压力信号与风险评分
//   forecast [days]                          价格预测
//   trucks [lat lng]                         车队状态
//   interventions                            干预建议
//   scenario [rain_days surge_pct delay_pct] 情景模拟
//   set-config <key> <value>                 写入 global 配置
//
// 结果以 JSON 输出到 stdout, 日志输出到 stderr
// ==========================================

use mandi_supply_chain::app::{get_default_db_path, AppState};
use mandi_supply_chain::domain::ScenarioInput;
use mandi_supply_chain::{logging, SupplyChainApi};
use serde::Serialize;
use std::error::Error;

const USAGE: &str = "usage: mandi-supply-chain [--db <path>] [--user <user_id>] \
<overview|stress|forecast|trucks|interventions|scenario|set-config> [args...]";

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let mut db_path: Option<String> = None;
    let mut user_id: Option<i64> = None;
    let mut rest: Vec<String> = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => db_path = Some(args.next().ok_or("--db 需要路径参数")?),
            "--user" => user_id = Some(args.next().ok_or("--user 需要用户ID")?.parse()?),
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => rest.push(arg),
        }
    }

    let db_path = db_path.unwrap_or_else(get_default_db_path);
    tracing::info!("{} v{}", mandi_supply_chain::APP_NAME, mandi_supply_chain::VERSION);
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path)?;
    let api: SupplyChainApi = match user_id {
        Some(id) => state.supply_chain_for_user(id)?,
        None => (*state.supply_chain_api).clone(),
    };

    let (command, params) = rest.split_first().ok_or(USAGE)?;
    match command.as_str() {
        "overview" => {
            let (lat, lng) = parse_coordinates(params)?;
            print_json(&api.overview(lat, lng)?)
        }
        "stress" => {
            let (lat, lng) = parse_coordinates(params)?;
            print_json(&api.stress(lat, lng)?)
        }
        "forecast" => {
            let days = params.first().map(|s| s.parse::<i64>()).transpose()?;
            print_json(&api.forecast(days)?)
        }
        "trucks" => {
            let (lat, lng) = parse_coordinates(params)?;
            print_json(&api.fleet(lat, lng)?)
        }
        "interventions" => print_json(&api.interventions()?),
        "scenario" => {
            let value = |i: usize| -> Result<f64, Box<dyn Error>> {
                Ok(params.get(i).map(|s| s.parse::<f64>()).transpose()?.unwrap_or(0.0))
            };
            let input = ScenarioInput::new(value(0)?, value(1)?, value(2)?);
            print_json(&api.scenario(input)?)
        }
        "set-config" => match params {
            [key, value] => {
                state.config_manager.set_config_value(key, value)?;
                println!("{}={}", key, value);
                Ok(())
            }
            _ => Err("set-config 需要 <key> <value>".into()),
        },
        other => Err(format!("未知命令: {}\n{}", other, USAGE).into()),
    }
}

/// 解析可选坐标参数 (0 个或 2 个)
fn parse_coordinates(params: &[String]) -> Result<(Option<f64>, Option<f64>), Box<dyn Error>> {
    match params {
        [] => Ok((None, None)),
        [lat, lng] => Ok((Some(lat.parse()?), Some(lng.parse()?))),
        _ => Err("坐标需要恰好提供 lat 与 lng 两个参数".into()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
