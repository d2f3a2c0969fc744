use std::fmt::{Debug, Display};

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::core::error::BoardError;
use crate::core::movement::{MovementRule, MovementStrategy};
use crate::core::position::Position;

#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Row holding this color's king and rooks at the start.
    pub fn home_row(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }

    /// Row this color's pawns start on.
    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }

    /// Row this color's pawns promote on.
    pub fn promotion_row(self) -> u8 {
        self.opposite().home_row()
    }

    /// Row delta of a forward pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(if self == &Self::White {
            "White"
        } else {
            "Black"
        })
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum FigureKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl FigureKind {
    /// Kinds a pawn may be promoted to.
    pub const PROMOTIONS: [FigureKind; 4] = [
        FigureKind::Rook,
        FigureKind::Knight,
        FigureKind::Bishop,
        FigureKind::Queen,
    ];

    pub fn letter(self) -> char {
        match self {
            FigureKind::Pawn => 'P',
            FigureKind::Knight => 'N',
            FigureKind::Bishop => 'B',
            FigureKind::Rook => 'R',
            FigureKind::Queen => 'Q',
            FigureKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<FigureKind> {
        match letter.to_ascii_uppercase() {
            'P' => Some(FigureKind::Pawn),
            'N' => Some(FigureKind::Knight),
            'B' => Some(FigureKind::Bishop),
            'R' => Some(FigureKind::Rook),
            'Q' => Some(FigureKind::Queen),
            'K' => Some(FigureKind::King),
            _ => None,
        }
    }

    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }

    /// Conventional material value, in pawns.
    pub fn value(self) -> u32 {
        match self {
            FigureKind::Pawn => 1,
            FigureKind::Knight | FigureKind::Bishop => 3,
            FigureKind::Rook => 5,
            FigureKind::Queen => 9,
            FigureKind::King => 0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Figure {
    pub color: Color,
    pub kind: FigureKind,
    moved: bool,
}

impl Figure {
    pub fn new(kind: FigureKind, color: Color) -> Figure {
        Figure {
            color,
            kind,
            moved: false,
        }
    }

    /// Whether the board has ever relocated this figure. Never resets.
    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// Same figure with the moved flag raised.
    pub fn into_moved(self) -> Figure {
        Figure {
            moved: true,
            ..self
        }
    }

    /// Movement rules this figure may follow, in evaluation order.
    pub fn movements(&self, strategy: &MovementStrategy) -> &'static [MovementRule] {
        strategy.rules_for(self.kind)
    }

    /// Letter shown on a text board: upper case for White, lower case for Black.
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

impl Debug for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Figure")
            .field("color", &self.color)
            .field("kind", &self.kind)
            .field("moved", &self.moved)
            .finish()
    }
}

/** Variation of 0x88 board: 128 slots, of which the 64 with clear 0x88 bits
 * are squares. Each square holds at most one figure. */
#[serde_as]
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde_as(as = "[_; 128]")]
    squares: [Option<Figure>; 128],
}

const BACK_ROW: [FigureKind; 8] = [
    FigureKind::Rook,
    FigureKind::Knight,
    FigureKind::Bishop,
    FigureKind::Queen,
    FigureKind::King,
    FigureKind::Bishop,
    FigureKind::Knight,
    FigureKind::Rook,
];

impl Board {
    /// Empty board.
    pub fn new() -> Board {
        Board {
            squares: [None; 128],
        }
    }

    /// Board with the standard 32 figure starting layout.
    pub fn initialize() -> Board {
        let mut board = Board::new();
        for color in [Color::White, Color::Black] {
            for (col, kind) in ('a'..='h').zip(BACK_ROW) {
                board.place(color.home_row(), col, Figure::new(kind, color));
                board.place(color.pawn_row(), col, Figure::new(FigureKind::Pawn, color));
            }
        }
        board
    }

    fn place(&mut self, row: u8, col: char, figure: Figure) {
        if let Some(position) = Position::new(row, col) {
            self.squares[position.index()] = Some(figure);
        }
    }

    pub fn get(&self, position: Position) -> Option<Figure> {
        self.squares[position.index()]
    }

    pub fn is_empty(&self, position: Position) -> bool {
        self.squares[position.index()].is_none()
    }

    /// Puts `figure` on an empty square.
    pub fn add_figure(&mut self, position: Position, figure: Figure) -> Result<(), BoardError> {
        let square = &mut self.squares[position.index()];
        if square.is_some() {
            return Err(BoardError::SquareOccupied(position));
        }
        trace!("Adding {figure:?} at {position}");
        *square = Some(figure);
        Ok(())
    }

    /// Takes the figure off `position`, handing ownership to the caller.
    pub fn remove_figure(&mut self, position: Position) -> Option<Figure> {
        self.squares[position.index()].take()
    }

    /** Relocate the figure on `from` to `to` and mark it as moved.
     * Whatever stood on `to` is returned to the caller. Legality is not
     * checked here. */
    pub fn move_figure_at_position(
        &mut self,
        from: Position,
        to: Position,
    ) -> Result<Option<Figure>, BoardError> {
        let figure = self
            .remove_figure(from)
            .ok_or(BoardError::SquareEmpty(from))?;
        let captured = self.squares[to.index()].replace(figure.into_moved());
        debug!("Moved {:?} {from}-{to}, captured: {captured:?}", figure.kind);
        Ok(captured)
    }

    /// Every figure on the board with its square, row by row from a1.
    pub fn figures(&self) -> impl Iterator<Item = (Position, Figure)> + '_ {
        Position::all().filter_map(|position| self.get(position).map(|figure| (position, figure)))
    }

    pub fn figures_of(&self, color: Color) -> impl Iterator<Item = (Position, Figure)> + '_ {
        self.figures().filter(move |(_, figure)| figure.color == color)
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.figures_of(color)
            .find(|(_, figure)| figure.kind == FigureKind::King)
            .map(|(position, _)| position)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initialize()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (1..=8).rev() {
            write!(f, "{row} ")?;
            for col in 'a'..='h' {
                let symbol = Position::new(row, col)
                    .and_then(|position| self.get(position))
                    .map_or('.', |figure| figure.symbol());
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 'a'..='h' {
            write!(f, " {col}")?;
        }
        writeln!(f)
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board")?;
        Display::fmt(self, f)
    }
}
