//! 主题和配色方案

use bevy::prelude::*;

/// 主题插件
pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        let theme = ColorTheme::midnight();
        app.insert_resource(ClearColor(theme.background))
            .insert_resource(theme);
    }
}

/// 颜色主题配置
#[derive(Resource, Clone, Debug)]
pub struct ColorTheme {
    pub name: String,

    // 棋盘
    pub background: Color,
    pub grid_lines: Color,

    // 标记
    pub x_mark: Color,
    pub o_mark: Color,
}

impl ColorTheme {
    /// 深蓝配色
    pub fn midnight() -> Self {
        Self {
            name: "深蓝".to_string(),

            background: Color::srgb_u8(25, 31, 43),   // #191F2B 深蓝灰
            grid_lines: Color::srgb_u8(125, 150, 191), // #7D96BF 灰蓝

            x_mark: Color::srgb_u8(125, 150, 191),
            o_mark: Color::srgb_u8(125, 150, 191),
        }
    }
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::midnight()
    }
}
