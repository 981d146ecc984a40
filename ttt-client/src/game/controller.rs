//! 走子控制器
//!
//! 本地点击与远端消息都经过这里：解析坐标、修改棋盘状态、通知渲染层。
//! 没有确认往返，所有操作同步完成，唯一的稳定状态是等待本地输入。

use serde::{Deserialize, Serialize};
use ttt_protocol::{
    decode_line, pixel_to_cell, split_batch, to_cell, Board, BoardState, Cell, Mark, Player,
    Point, RangeError, RemoteCommand, DEFAULT_BOARD_PIXELS,
};

use crate::board::RenderAdapter;

/// 远端落子是否写入棋盘状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemotePolicy {
    /// 远端落子和清空同样修改棋盘状态
    #[default]
    Unified,
    /// 远端消息只触发绘制，棋盘状态只记录本地落子
    DrawOnly,
}

/// 一次本地落子的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalMove {
    pub cell: Cell,
    pub mark: Mark,
    /// 落子前该格子上的标记（允许覆盖）
    pub replaced: Mark,
}

/// 一条远端指令的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOutcome {
    Placed { cell: Cell, mark: Mark },
    Cleared,
}

/// 批次处理统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub placed: usize,
    pub cleared: usize,
    pub decode_errors: usize,
    pub range_errors: usize,
}

impl BatchReport {
    /// 被跳过的行数
    pub fn rejected(&self) -> usize {
        self.decode_errors + self.range_errors
    }
}

/// 走子控制器
#[derive(Debug, Clone)]
pub struct MoveController {
    state: BoardState,
    board_pixel_size: f32,
    remote_policy: RemotePolicy,
}

impl Default for MoveController {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_PIXELS, RemotePolicy::default())
    }
}

impl MoveController {
    pub fn new(board_pixel_size: f32, remote_policy: RemotePolicy) -> Self {
        Self {
            state: BoardState::initial(),
            board_pixel_size,
            remote_policy,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn turn(&self) -> Player {
        self.state.turn
    }

    /// 处理一次本地点击
    ///
    /// 点击在棋盘外时什么都不做。否则按当前回合落子（已有标记的格子会被覆盖），
    /// 重绘该格子和分隔线，然后切换回合。
    pub fn apply_local_move<R>(&mut self, point: Point, render: &mut R) -> Option<LocalMove>
    where
        R: RenderAdapter + ?Sized,
    {
        let cell = pixel_to_cell(point, self.board_pixel_size)?;
        let mark = self.state.turn.mark();
        let replaced = self.state.board.get(cell);

        self.state.board.set(cell, mark);
        render.clear_cell(cell);
        render.draw_mark(cell, mark);
        render.draw_grid_lines();
        self.state.switch_turn();

        tracing::debug!(%cell, ?mark, ?replaced, "local move");
        Some(LocalMove { cell, mark, replaced })
    }

    /// 处理一条远端落子
    ///
    /// 玩家编号 1/2 之外的任何值都表示清空棋盘，此时不检查索引。
    /// 索引越界时返回 `RangeError`，不绘制也不修改状态。远端消息从不改变回合。
    pub fn apply_remote_move<R>(
        &mut self,
        player_tag: i64,
        linear_index: i64,
        render: &mut R,
    ) -> Result<RemoteOutcome, RangeError>
    where
        R: RenderAdapter + ?Sized,
    {
        let Some(player) = Player::from_tag(player_tag) else {
            self.clear(render);
            return Ok(RemoteOutcome::Cleared);
        };

        let cell = to_cell(linear_index)?;
        let mark = player.mark();
        if self.remote_policy == RemotePolicy::Unified {
            self.state.board.set(cell, mark);
        }
        render.draw_mark(cell, mark);

        tracing::debug!(%cell, ?mark, "remote move");
        Ok(RemoteOutcome::Placed { cell, mark })
    }

    /// 处理一条已解码的远端指令
    pub fn apply_command<R>(&mut self, command: RemoteCommand, render: &mut R) -> Result<RemoteOutcome, RangeError>
    where
        R: RenderAdapter + ?Sized,
    {
        match command {
            RemoteCommand::Place { player_tag, index } => self.apply_remote_move(player_tag, index, render),
            RemoteCommand::Clear => {
                self.clear(render);
                Ok(RemoteOutcome::Cleared)
            }
        }
    }

    /// 按到达顺序逐行处理一个批次
    ///
    /// 解码失败或索引越界的行被跳过并记录日志，不影响后续行。
    pub fn apply_batch<R>(&mut self, batch: &str, render: &mut R) -> BatchReport
    where
        R: RenderAdapter + ?Sized,
    {
        let mut report = BatchReport::default();

        for line in split_batch(batch) {
            let command = match decode_line(line) {
                Ok(command) => command,
                Err(e) => {
                    tracing::warn!("Skipping undecodable line {:?}: {}", line, e);
                    report.decode_errors += 1;
                    continue;
                }
            };

            match self.apply_command(command, render) {
                Ok(RemoteOutcome::Placed { .. }) => report.placed += 1,
                Ok(RemoteOutcome::Cleared) => report.cleared += 1,
                Err(e) => {
                    tracing::warn!("Rejecting line {:?}: {}", line, e);
                    report.range_errors += 1;
                }
            }
        }

        report
    }

    fn clear<R>(&mut self, render: &mut R)
    where
        R: RenderAdapter + ?Sized,
    {
        if self.remote_policy == RemotePolicy::Unified {
            self.state.board.reset_all();
        }
        for cell in Cell::all() {
            render.clear_cell(cell);
        }
        tracing::debug!("board cleared");
    }
}
