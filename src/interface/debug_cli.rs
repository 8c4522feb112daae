//! 文字 CLI：读取 stdin → 解析命令 → 执行并打印

use bevy::app::AppExit;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::core::{events::LogEvent, states::AppState};
use crate::data::{ItemAssets, schema::ItemCatalog};
use crate::inventory::{components::Inventory, events::*};

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match buffer.lock() {
                        Ok(mut buf) => buf.push_back(line.to_string()),
                        Err(_) => break,
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands.run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
struct CliLine(String);

/// 我们支持的命令
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Items(Option<String>), // None=全部；Some(token)=按 id/uuid/name 查询
    Inventory,
    Increment(String),
    Decrease(String),
    IncreaseBy { id: String, amount: i32 },
    Save,
    Usage(String),         // 参数不合法，只提示不执行
    Unsupported(String),
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

#[allow(clippy::too_many_arguments)]
fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    state: Res<State<AppState>>,
    item_assets: Res<ItemAssets>,
    catalogs: Res<Assets<ItemCatalog>>,
    inventory: Res<Inventory>,
    mut ev_adjust: EventWriter<AdjustItemEvent>,
    mut ev_list: EventWriter<ListInventoryEvent>,
    mut ev_save: EventWriter<SaveInventoryEvent>,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                log.write(LogEvent(
                    "命令列表:
  help                   查看帮助
  status                 查看当前状态
  exit / quit            退出程序
  items                  列出默认物品目录
  items <token>          用 id / uuid / 名称 查询单个物品
  inv                    查看背包
  inc <id>               数量 +1
  dec <id>               数量 -1
  add <id> <amount>      数量 +amount（可为负）
  save                   立即保存
  ".into()));
            }

            Command::Status => {
                let cnt = item_assets.get(&catalogs).map_or(0, |c| c.items.len());
                log.write(LogEvent(format!(
                    "State: {:?}, Catalog: {}, Inventory: {}",
                    state.get(),
                    cnt,
                    inventory.len()
                )));
            }

            Command::Exit => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Success);
            }

            Command::Items(token) => {
                let Some(catalog) = item_assets.get(&catalogs) else {
                    continue;
                };
                match token {
                    None => {
                        for entry in &catalog.items {
                            let uuid = uuid_from_id(&entry.id);
                            log.write(LogEvent(format!(
                                "{} | {} | {}",
                                uuid, entry.id, entry.name
                            )));
                        }
                    }
                    Some(t) => {
                        let t_low = t.to_lowercase();
                        if let Some(e) = catalog.items.iter().find(|e| {
                            e.id.eq_ignore_ascii_case(&t_low)
                                || e.name.eq_ignore_ascii_case(&t_low)
                                || uuid_from_id(&e.id).to_string() == t_low
                        }) {
                            let uuid = uuid_from_id(&e.id);
                            log.write(LogEvent(format!(
                                "==================================================
UUID  : {uuid}
ID    : {}
Name  : {}
Count : {}
==================================================",
                                e.id,
                                e.name,
                                inventory.get(&e.id).unwrap_or(0)
                            )));
                        } else {
                            log.write(LogEvent("未找到匹配物品".into()));
                        }
                    }
                }
            }

            Command::Inventory => {
                ev_list.write(ListInventoryEvent);
            }

            Command::Increment(id) => {
                ev_adjust.write(AdjustItemEvent::increment(id));
            }

            Command::Decrease(id) => {
                ev_adjust.write(AdjustItemEvent::decrease(id));
            }

            Command::IncreaseBy { id, amount } => {
                ev_adjust.write(AdjustItemEvent::increase_by(id, amount));
            }

            Command::Save => {
                ev_save.write(SaveInventoryEvent);
            }

            Command::Usage(msg) => {
                log.write(LogEvent(msg));
            }

            Command::Unsupported(cmd) => {
                log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => {
            let token = parts.next().map(|s| s.to_string());
            Command::Items(token)
        }
        "inventory" | "inv" => Command::Inventory,
        "inc" | "+" => match next_id(&mut parts) {
            Ok(id) => Command::Increment(id),
            Err(msg) => Command::Usage(msg),
        },
        "dec" | "-" => match next_id(&mut parts) {
            Ok(id) => Command::Decrease(id),
            Err(msg) => Command::Usage(msg),
        },
        "add" | "give" => {
            let id = match next_id(&mut parts) {
                Ok(id) => id,
                Err(msg) => return Command::Usage(msg),
            };
            // 只有省略数量时才默认为 1
            match parts.next().map(str::parse::<i32>) {
                None => Command::IncreaseBy { id, amount: 1 },
                Some(Ok(amount)) => Command::IncreaseBy { id, amount },
                Some(Err(_)) => Command::Usage(format!(
                    "数量必须是 {} 到 {} 之间的整数；用法: add <id> <amount>",
                    i32::MIN,
                    i32::MAX
                )),
            }
        }
        "save" => Command::Save,
        other => Command::Unsupported(other.into()),
    }
}

/// 取物品 id；缺失或含保留字符时返回提示
fn next_id<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<String, String> {
    match parts.next() {
        None => Err("缺少物品 id".into()),
        Some(id) if id.contains([',', ':']) => Err(format!("物品 id 不能包含 ',' 或 ':': {id}")),
        Some(id) => Ok(id.to_string()),
    }
}

fn uuid_from_id(id: &str) -> Uuid {
    // 用固定 namespace + id 字节生成版本 5 UUID，保证可重复得到同一值
    Uuid::new_v5(&Uuid::NAMESPACE_OID, id.as_bytes())
}
