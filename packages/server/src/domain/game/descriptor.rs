//! Static capability descriptors served by `/{Game}/api`.

use serde::Serialize;

/// Read-only metadata of one game
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "minNoPlayers")]
    pub min_players: u8,
    #[serde(rename = "maxNoPlayers")]
    pub max_players: u8,
    pub boards: &'static [BoardGeometry],
}

impl GameDescriptor {
    /// Dice used by the game, if any
    pub fn dice(&self) -> Option<&'static DiceSpec> {
        self.boards.iter().find_map(|board| match board {
            BoardGeometry::Random(dice) => Some(dice),
            _ => None,
        })
    }

    /// Index of the dice in `boards`
    pub fn dice_board(&self) -> Option<usize> {
        self.boards
            .iter()
            .position(|board| matches!(board, BoardGeometry::Random(_)))
    }
}

/// Geometry and texture hints of one board layer
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum BoardGeometry {
    /// Rectangular grid addressed as `a1`
    Simple {
        row_count: u8,
        row_labels: &'static str,
        column_count: u8,
        column_labels: &'static str,
        tile_width: u16,
        tile_height: u16,
        textures: &'static [&'static str],
    },
    /// Free-form tile layout over a background image
    Custom {
        tile_width: u16,
        tile_height: u16,
        width: u16,
        height: u16,
        background: &'static str,
        textures: &'static [&'static str],
        tiles: &'static [TrackTile],
    },
    /// Dice
    Random(DiceSpec),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceSpec {
    pub real: bool,
    pub number_of_sides: u8,
    pub number_of_dices: u8,
    /// Intermediate faces shown before the final one
    pub rotations: u8,
}

/// Pixel position of a named tile (`s0`, `m1`, `b1`, `f1`, …)
#[derive(Debug, Serialize)]
pub struct TrackTile {
    pub x: u16,
    pub y: u16,
    pub name: &'static str,
}

const fn tile(x: u16, y: u16, name: &'static str) -> TrackTile {
    TrackTile { x, y, name }
}

const GRID_TEXTURES_2P: [&str; 3] = [
    "/static/images/textures/Tile1.png",
    "/static/images/textures/Tile1sp1.png",
    "/static/images/textures/Tile1sp2.png",
];

const GRID_TEXTURES_4P: [&str; 5] = [
    "/static/images/textures/Tile1.png",
    "/static/images/textures/Tile1sp1.png",
    "/static/images/textures/Tile1sp2.png",
    "/static/images/textures/Tile1sp3.png",
    "/static/images/textures/Tile1sp4.png",
];

const FLEET_TEXTURES: [&str; 6] = [
    "/static/images/textures/Tile1.png",
    "/static/images/textures/Tile1p1.png",
    "/static/images/textures/Tile1p2.png",
    "/static/images/textures/Tile1s.png",
    "/static/images/textures/Tile1sp1.png",
    "/static/images/textures/Tile1sp2.png",
];

const PAWN_TEXTURES: [&str; 5] = [
    "/static/images/textures/TileEmpty.png",
    "/static/images/textures/TileP1.png",
    "/static/images/textures/TileP2.png",
    "/static/images/textures/TileP3.png",
    "/static/images/textures/TileP4.png",
];

const FLEET_GRID: BoardGeometry = BoardGeometry::Simple {
    row_count: 8,
    row_labels: "d",
    column_count: 8,
    column_labels: "l",
    tile_width: 64,
    tile_height: 64,
    textures: &FLEET_TEXTURES,
};

pub(super) static TIC_TAC_TOE: GameDescriptor = GameDescriptor {
    name: "TicTacToe",
    description: "Two-player tic-tac-toe on a 3x3 grid",
    min_players: 2,
    max_players: 2,
    boards: &[BoardGeometry::Simple {
        row_count: 3,
        row_labels: "d",
        column_count: 3,
        column_labels: "l",
        tile_width: 64,
        tile_height: 64,
        textures: &GRID_TEXTURES_2P,
    }],
};

pub(super) static CONNECT_FOUR: GameDescriptor = GameDescriptor {
    name: "ConnectFour",
    description: "Four in a row for up to four players on a 9x9 grid",
    min_players: 2,
    max_players: 4,
    boards: &[BoardGeometry::Simple {
        row_count: 9,
        row_labels: "d",
        column_count: 9,
        column_labels: "l",
        tile_width: 64,
        tile_height: 64,
        textures: &GRID_TEXTURES_4P,
    }],
};

pub(super) static MAN_DONT_GET_ANGRY: GameDescriptor = GameDescriptor {
    name: "ManDontGetAngry",
    description: "Race four pawns around the track, up to four players",
    min_players: 2,
    max_players: 4,
    boards: &[
        BoardGeometry::Custom {
            tile_width: 64,
            tile_height: 64,
            width: 736,
            height: 736,
            background: "/MDGABG",
            textures: &PAWN_TEXTURES,
            tiles: &LUDO_TILES,
        },
        BoardGeometry::Random(DiceSpec {
            real: true,
            number_of_sides: 6,
            number_of_dices: 1,
            rotations: 10,
        }),
    ],
};

pub(super) static BATTLESHIPS: GameDescriptor = GameDescriptor {
    name: "Battleships",
    description: "Two-player battleships on 8x8 grids",
    min_players: 2,
    max_players: 2,
    boards: &[FLEET_GRID, FLEET_GRID],
};

/// Track (`s`/`m`), bases (`b<seat>`) and finishes (`f<seat>`)
static LUDO_TILES: [TrackTile; 72] = [
    tile(16, 272, "s0"),
    tile(80, 272, "m1"),
    tile(144, 272, "s2"),
    tile(208, 272, "m3"),
    tile(272, 272, "m4"),
    tile(272, 208, "m5"),
    tile(272, 144, "s6"),
    tile(272, 80, "m7"),
    tile(272, 16, "m8"),
    tile(336, 16, "m9"),
    tile(400, 16, "s10"),
    tile(400, 80, "m11"),
    tile(400, 144, "s12"),
    tile(400, 208, "m13"),
    tile(400, 272, "m14"),
    tile(464, 272, "m15"),
    tile(528, 272, "s16"),
    tile(592, 272, "m17"),
    tile(656, 272, "m18"),
    tile(656, 336, "m19"),
    tile(656, 400, "s20"),
    tile(592, 400, "m21"),
    tile(528, 400, "s22"),
    tile(464, 400, "m23"),
    tile(400, 400, "m24"),
    tile(400, 464, "m25"),
    tile(400, 528, "s26"),
    tile(400, 592, "m27"),
    tile(400, 656, "m28"),
    tile(336, 656, "m29"),
    tile(272, 656, "s30"),
    tile(272, 592, "m31"),
    tile(272, 528, "s32"),
    tile(272, 464, "m33"),
    tile(272, 400, "m34"),
    tile(208, 400, "m35"),
    tile(144, 400, "s36"),
    tile(80, 400, "m37"),
    tile(16, 400, "m38"),
    tile(16, 336, "m39"),
    tile(16, 16, "b1"),
    tile(80, 16, "b1"),
    tile(16, 80, "b1"),
    tile(80, 80, "b1"),
    tile(592, 592, "b2"),
    tile(656, 592, "b2"),
    tile(592, 656, "b2"),
    tile(656, 656, "b2"),
    tile(592, 16, "b3"),
    tile(656, 16, "b3"),
    tile(592, 80, "b3"),
    tile(656, 80, "b3"),
    tile(16, 592, "b4"),
    tile(80, 592, "b4"),
    tile(16, 656, "b4"),
    tile(80, 656, "b4"),
    tile(80, 336, "f1"),
    tile(144, 336, "f1"),
    tile(208, 336, "f1"),
    tile(272, 336, "f1"),
    tile(592, 336, "f2"),
    tile(528, 336, "f2"),
    tile(464, 336, "f2"),
    tile(400, 336, "f2"),
    tile(336, 272, "f3"),
    tile(336, 208, "f3"),
    tile(336, 144, "f3"),
    tile(336, 80, "f3"),
    tile(336, 400, "f4"),
    tile(336, 464, "f4"),
    tile(336, 528, "f4"),
    tile(336, 592, "f4"),];
