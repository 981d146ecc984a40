//! 自对弈走子源
//!
//! 双方轮流在随机空格上落子，直到棋盘下满；随后发出对局结束通知并开始下一局。
//! 不做胜负判定，每局固定 9 步。

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use ttt_protocol::{encode_line, join_batch, to_index, BoardState, GameInfo, PlayerMove};

/// 走子源产生的事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEvent {
    /// 一步落子
    Move(PlayerMove),
    /// 对局结束
    GameOver(GameInfo),
}

impl FeedEvent {
    fn encode(&self) -> ttt_protocol::Result<String> {
        match self {
            FeedEvent::Move(mv) => encode_line(mv),
            FeedEvent::GameOver(info) => encode_line(info),
        }
    }
}

/// 把一步产生的事件编码成一个批次
pub fn encode_events(events: &[FeedEvent]) -> ttt_protocol::Result<String> {
    let lines = events
        .iter()
        .map(FeedEvent::encode)
        .collect::<ttt_protocol::Result<Vec<_>>>()?;
    Ok(join_batch(lines))
}

/// 自对弈走子源
pub struct SelfPlay {
    rng: StdRng,
    state: BoardState,
    epoch: u32,
    game: u32,
    games_per_epoch: u32,
    games_finished: u32,
}

impl SelfPlay {
    pub fn new(games_per_epoch: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            state: BoardState::initial(),
            epoch: 0,
            game: 0,
            games_per_epoch: games_per_epoch.max(1),
            games_finished: 0,
        }
    }

    /// 已完成的对局数
    pub fn games_finished(&self) -> u32 {
        self.games_finished
    }

    /// 当前棋盘
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// 走一步
    ///
    /// 返回这一步的落子；若棋盘因此下满，还会附带对局结束通知。
    pub fn step(&mut self) -> Vec<FeedEvent> {
        let empty = self.state.board.empty_cells();
        let Some(&cell) = empty.choose(&mut self.rng) else {
            // 正常流程不会出现满盘后再走子
            self.finish_game();
            return Vec::new();
        };

        let player = self.state.turn;
        self.state.board.set(cell, player.mark());
        self.state.switch_turn();

        let mut events = Vec::with_capacity(2);
        if let Ok(index) = to_index(cell) {
            tracing::debug!(%player, %cell, index, "self-play move");
            events.push(FeedEvent::Move(PlayerMove::new(player, index)));
        }

        if self.state.board.empty_cells().is_empty() {
            events.push(FeedEvent::GameOver(GameInfo {
                epoch: self.epoch,
                game: self.game,
            }));
            self.finish_game();
        }

        events
    }

    fn finish_game(&mut self) {
        tracing::info!(epoch = self.epoch, game = self.game, "game finished");
        self.state = BoardState::initial();
        self.games_finished += 1;
        self.game += 1;
        if self.game >= self.games_per_epoch {
            self.game = 0;
            self.epoch += 1;
        }
    }
}
