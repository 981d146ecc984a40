//! 批次编解码
//!
//! 一个网络事件携带一个批次，批次内按换行分隔多条 JSON 消息。
//! 每行独立解码，某一行失败不影响同批次的其他行。

use serde::Serialize;

use crate::constants::BATCH_DELIMITER;
use crate::error::{DecodeError, Result};
use crate::message::{RemoteCommand, WireMessage};

/// 解码单行消息
///
/// `Player` 为整数 1 或 2 时是落子，此时 `Single` 必须是整数；
/// 其他任何 `Player`（缺失、null、0、负数、超范围、非整数）都表示清空棋盘。
/// 小数部分为零的数字（如 `1.0`）按整数处理。
pub fn decode_line(line: &str) -> std::result::Result<RemoteCommand, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(line)?;
    if !value.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    let wire: WireMessage = serde_json::from_value(value)?;

    let player_tag = wire
        .player
        .as_ref()
        .and_then(integral)
        .filter(|tag| matches!(tag, 1 | 2));

    let Some(player_tag) = player_tag else {
        return Ok(RemoteCommand::Clear);
    };

    let index = wire
        .single
        .as_ref()
        .and_then(integral)
        .ok_or(DecodeError::MissingSingle { player: player_tag })?;

    Ok(RemoteCommand::Place { player_tag, index })
}

/// 取 JSON 数字的整数值，`4.0` 视为 `4`，`1.5` 和字符串不算
fn integral(value: &serde_json::Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    // i64::MAX as f64 是 2^63，取开区间
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// 拆分批次，返回非空白行（保持到达顺序）
pub fn split_batch(batch: &str) -> impl Iterator<Item = &str> {
    batch
        .split(BATCH_DELIMITER)
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
}

/// 解码整个批次，每行一个结果
pub fn decode_batch(batch: &str) -> Vec<std::result::Result<RemoteCommand, DecodeError>> {
    split_batch(batch).map(decode_line).collect()
}

/// 编码单条消息
pub fn encode_line<M: Serialize>(msg: &M) -> Result<String> {
    Ok(serde_json::to_string(msg)?)
}

/// 把已编码的多行拼成一个批次
pub fn join_batch<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut batch = String::new();
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            batch.push(BATCH_DELIMITER);
        }
        batch.push_str(line.as_ref());
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{GameInfo, PlayerMove};
    use crate::Player;

    #[test]
    fn test_decode_place() {
        assert_eq!(
            decode_line(r#"{"Player":1,"Single":4}"#).unwrap(),
            RemoteCommand::Place { player_tag: 1, index: 4 }
        );
        assert_eq!(
            decode_line(r#"{"Single":0,"Player":2}"#).unwrap(),
            RemoteCommand::Place { player_tag: 2, index: 0 }
        );
    }

    #[test]
    fn test_integral_floats_decode_as_integers() {
        assert_eq!(
            decode_line(r#"{"Player":1.0,"Single":4}"#).unwrap(),
            RemoteCommand::Place { player_tag: 1, index: 4 }
        );
        assert_eq!(
            decode_line(r#"{"Player":2,"Single":4.0}"#).unwrap(),
            RemoteCommand::Place { player_tag: 2, index: 4 }
        );
        assert_eq!(decode_line(r#"{"Player":3.0,"Single":4}"#).unwrap(), RemoteCommand::Clear);
        assert!(matches!(
            decode_line(r#"{"Player":1,"Single":4.5}"#),
            Err(DecodeError::MissingSingle { player: 1 })
        ));
        assert!(matches!(
            decode_line(r#"{"Player":1,"Single":1e300}"#),
            Err(DecodeError::MissingSingle { player: 1 })
        ));
    }

    #[test]
    fn test_out_of_range_single_still_decodes() {
        // 范围校验留给坐标映射层
        assert_eq!(
            decode_line(r#"{"Player":1,"Single":9}"#).unwrap(),
            RemoteCommand::Place { player_tag: 1, index: 9 }
        );
    }

    #[test]
    fn test_unknown_player_is_clear() {
        for line in [
            r#"{"Player":0,"Single":3}"#,
            r#"{"Player":3,"Single":3}"#,
            r#"{"Player":-1}"#,
            r#"{"Player":null}"#,
            r#"{"Player":"1","Single":3}"#,
            r#"{"Player":1.5,"Single":3}"#,
            r#"{"Epoch":0,"Game":2}"#,
            r#"{}"#,
        ] {
            assert_eq!(decode_line(line).unwrap(), RemoteCommand::Clear, "{line}");
        }
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode_line("not json"), Err(DecodeError::Json(_))));
        assert!(matches!(decode_line("[1,2]"), Err(DecodeError::NotAnObject)));
        assert!(matches!(decode_line("42"), Err(DecodeError::NotAnObject)));
        assert!(matches!(
            decode_line(r#"{"Player":1}"#),
            Err(DecodeError::MissingSingle { player: 1 })
        ));
        assert!(matches!(
            decode_line(r#"{"Player":2,"Single":"4"}"#),
            Err(DecodeError::MissingSingle { player: 2 })
        ));
    }

    #[test]
    fn test_decode_batch_keeps_order_and_isolates_errors() {
        let batch = "{\"Player\":1,\"Single\":0}\n{garbage\n{\"Player\":2,\"Single\":8}\n";
        let results = decode_batch(batch);
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().unwrap(),
            &RemoteCommand::Place { player_tag: 1, index: 0 }
        );
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().unwrap(),
            &RemoteCommand::Place { player_tag: 2, index: 8 }
        );
    }

    #[test]
    fn test_split_batch_skips_blank_lines() {
        let lines: Vec<&str> = split_batch("a\r\n\n  \nb").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_encode_batch() {
        let lines = vec![
            encode_line(&PlayerMove::new(Player::One, 6)).unwrap(),
            encode_line(&GameInfo { epoch: 0, game: 1 }).unwrap(),
        ];
        let batch = join_batch(&lines);
        assert_eq!(batch, "{\"Player\":1,\"Single\":6}\n{\"Epoch\":0,\"Game\":1}");

        let decoded: Vec<RemoteCommand> = decode_batch(&batch).into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(
            decoded,
            vec![RemoteCommand::Place { player_tag: 1, index: 6 }, RemoteCommand::Clear]
        );
    }
}
