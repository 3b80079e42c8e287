//! Static evaluation.
//!
//! A pure function of the position returning centipawns from the
//! side-to-move's perspective. White-perspective middlegame and endgame
//! totals are accumulated term by term, tapered by remaining material,
//! then flipped for Black. Integer arithmetic throughout; swapping
//! colors and flipping ranks negates the score exactly.

use super::attack_tables::{queen_attacks, slider_attacks, KING_ATTACKS, KNIGHT_ATTACKS,
    PAWN_ATTACKS};
use super::masks::{ADJACENT_FILES, FILES, PASSED_PAWN_MASK};
use super::pst::{MATERIAL_EG, MATERIAL_MG, PHASE_WEIGHTS, PST_EG, PST_MG};
use super::{Bitboard, Board, Color, Piece, Square};

const BISHOP_PAIR_BONUS: i32 = 30;
const PHASE_TOTAL: i32 = 24;

/// Mobility weight per piece kind (pawns and kings excluded).
const MOBILITY_WEIGHTS: [i32; 6] = [0, 4, 3, 2, 1, 0];

/// Bonus for a passed pawn by relative rank (rank 1 and 8 unreachable).
const PASSED_BONUS_MG: [i32; 8] = [0, 5, 10, 20, 35, 60, 100, 0];
const PASSED_BONUS_EG: [i32; 8] = [0, 10, 20, 35, 55, 90, 140, 0];

const ROOK_OPEN_FILE_MG: i32 = 25;
const ROOK_OPEN_FILE_EG: i32 = 15;
const ROOK_HALF_OPEN_FILE_MG: i32 = 12;
const ROOK_HALF_OPEN_FILE_EG: i32 = 8;
const ROOK_ON_SEVENTH_MG: i32 = 20;
const ROOK_ON_SEVENTH_EG: i32 = 30;

const KNIGHT_OUTPOST_MG: i32 = 25;
const KNIGHT_OUTPOST_EG: i32 = 15;

/// Penalty per missing pawn of the three-pawn shield in front of the king.
const SHIELD_MISSING_PENALTY: i32 = 12;
/// Penalty per enemy piece bearing on the king's neighborhood.
const KING_ATTACKER_PENALTY: i32 = 9;

/// Middlegame/endgame interpolation weights derived from remaining
/// non-pawn material.
#[derive(Clone, Copy)]
struct PhaseFactors {
    midphase: i32,
    endphase: i32,
}

impl PhaseFactors {
    #[inline]
    fn from_board(board: &Board) -> Self {
        let mut phase = 0;
        for c in 0..2 {
            for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen] {
                phase +=
                    PHASE_WEIGHTS[piece.index()] * board.pieces[c][piece.index()].popcount() as i32;
            }
        }
        let midphase = phase.min(PHASE_TOTAL);
        PhaseFactors {
            midphase,
            endphase: PHASE_TOTAL - midphase,
        }
    }

    #[inline]
    fn taper(self, mg: i32, eg: i32) -> i32 {
        (mg * self.midphase + eg * self.endphase) / PHASE_TOTAL
    }
}

/// A (middlegame, endgame) score pair from White's perspective.
#[derive(Clone, Copy, Default)]
struct TaperedScore {
    mg: i32,
    eg: i32,
}

impl TaperedScore {
    #[inline]
    fn add(&mut self, sign: i32, mg: i32, eg: i32) {
        self.mg += sign * mg;
        self.eg += sign * eg;
    }
}

impl Board {
    /// Evaluate the position from the side-to-move's perspective.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        let mut score = TaperedScore::default();

        for color in [Color::White, Color::Black] {
            let sign = if color == Color::White { 1 } else { -1 };
            self.eval_material_and_pst(color, sign, &mut score);
            self.eval_mobility(color, sign, &mut score);
            self.eval_pawns(color, sign, &mut score);
            self.eval_rooks(color, sign, &mut score);
            self.eval_knight_outposts(color, sign, &mut score);
            self.eval_king_safety(color, sign, &mut score);

            if self.pieces[color.index()][Piece::Bishop.index()].popcount() >= 2 {
                score.add(sign, BISHOP_PAIR_BONUS, BISHOP_PAIR_BONUS);
            }
        }

        let phase = PhaseFactors::from_board(self);
        let white_score = phase.taper(score.mg, score.eg);

        if self.white_to_move {
            white_score
        } else {
            -white_score
        }
    }

    #[inline]
    fn pst_index(sq_idx: usize, color: Color) -> usize {
        if color == Color::White {
            sq_idx
        } else {
            sq_idx ^ 56
        }
    }

    fn eval_material_and_pst(&self, color: Color, sign: i32, score: &mut TaperedScore) {
        for piece in Piece::ALL {
            let p = piece.index();
            for sq_idx in self.pieces[color.index()][p].iter() {
                let pst_sq = Self::pst_index(sq_idx, color);
                score.add(sign, MATERIAL_MG[p] + PST_MG[p][pst_sq], MATERIAL_EG[p] + PST_EG[p][pst_sq]);
            }
        }
    }

    /// Attack-set popcounts weighted per kind; own pieces do not block
    /// being counted as mobility targets for sliders beyond occupancy.
    fn eval_mobility(&self, color: Color, sign: i32, score: &mut TaperedScore) {
        let c = color.index();
        let own = self.occupied[c].0;
        let occ = self.all_occupied.0;
        let mut mobility = 0;

        for sq in self.pieces[c][Piece::Knight.index()].iter() {
            mobility += MOBILITY_WEIGHTS[Piece::Knight.index()]
                * (KNIGHT_ATTACKS[sq] & !own).count_ones() as i32;
        }
        for sq in self.pieces[c][Piece::Bishop.index()].iter() {
            mobility += MOBILITY_WEIGHTS[Piece::Bishop.index()]
                * (slider_attacks(sq, occ, true) & !own).count_ones() as i32;
        }
        for sq in self.pieces[c][Piece::Rook.index()].iter() {
            mobility += MOBILITY_WEIGHTS[Piece::Rook.index()]
                * (slider_attacks(sq, occ, false) & !own).count_ones() as i32;
        }
        for sq in self.pieces[c][Piece::Queen.index()].iter() {
            mobility += MOBILITY_WEIGHTS[Piece::Queen.index()]
                * (queen_attacks(sq, occ) & !own).count_ones() as i32;
        }

        score.add(sign, mobility, mobility);
    }

    fn eval_pawns(&self, color: Color, sign: i32, score: &mut TaperedScore) {
        let c = color.index();
        let enemy_pawns = self.pieces[1 - c][Piece::Pawn.index()].0;

        for sq_idx in self.pieces[c][Piece::Pawn.index()].iter() {
            if PASSED_PAWN_MASK[c][sq_idx].0 & enemy_pawns == 0 {
                let rank = sq_idx / 8;
                let relative_rank = if color == Color::White { rank } else { 7 - rank };
                score.add(
                    sign,
                    PASSED_BONUS_MG[relative_rank],
                    PASSED_BONUS_EG[relative_rank],
                );
            }
        }
    }

    fn eval_rooks(&self, color: Color, sign: i32, score: &mut TaperedScore) {
        let c = color.index();
        let own_pawns = self.pieces[c][Piece::Pawn.index()].0;
        let enemy_pawns = self.pieces[1 - c][Piece::Pawn.index()].0;
        let seventh = if color == Color::White { 6 } else { 1 };

        for sq_idx in self.pieces[c][Piece::Rook.index()].iter() {
            let file = FILES[sq_idx % 8].0;
            if own_pawns & file == 0 {
                if enemy_pawns & file == 0 {
                    score.add(sign, ROOK_OPEN_FILE_MG, ROOK_OPEN_FILE_EG);
                } else {
                    score.add(sign, ROOK_HALF_OPEN_FILE_MG, ROOK_HALF_OPEN_FILE_EG);
                }
            }
            if sq_idx / 8 == seventh {
                score.add(sign, ROOK_ON_SEVENTH_MG, ROOK_ON_SEVENTH_EG);
            }
        }
    }

    /// A knight is an outpost when a friendly pawn guards it and no enemy
    /// pawn can ever attack its square.
    fn eval_knight_outposts(&self, color: Color, sign: i32, score: &mut TaperedScore) {
        let c = color.index();
        let own_pawns = self.pieces[c][Piece::Pawn.index()].0;
        let enemy_pawns = self.pieces[1 - c][Piece::Pawn.index()].0;

        for sq_idx in self.pieces[c][Piece::Knight.index()].iter() {
            let rank = sq_idx / 8;
            let relative_rank = if color == Color::White { rank } else { 7 - rank };
            if !(3..=5).contains(&relative_rank) {
                continue;
            }
            let attack_span = PASSED_PAWN_MASK[c][sq_idx].0 & ADJACENT_FILES[sq_idx % 8].0;
            if enemy_pawns & attack_span != 0 {
                continue;
            }
            let supported = own_pawns & PAWN_ATTACKS[1 - c][sq_idx] != 0;
            if supported {
                score.add(sign, KNIGHT_OUTPOST_MG, KNIGHT_OUTPOST_EG);
            }
        }
    }

    fn eval_king_safety(&self, color: Color, sign: i32, score: &mut TaperedScore) {
        let c = color.index();
        let Some(king_sq) = self.find_king(color) else {
            return;
        };

        // Pawn shield: the three squares diagonally and directly ahead of
        // the king. Only a middlegame concern.
        let own_pawns = self.pieces[c][Piece::Pawn.index()].0;
        let mut shield = 0;
        let ahead: isize = if color == Color::White { 1 } else { -1 };
        let king_rank = king_sq.rank() as isize;
        let shield_rank = king_rank + ahead;
        if (0..8).contains(&shield_rank) {
            for df in [-1isize, 0, 1] {
                let file = king_sq.file() as isize + df;
                if (0..8).contains(&file) {
                    let sq = Square::new(shield_rank as usize, file as usize);
                    if own_pawns & Bitboard::from_square(sq).0 != 0 {
                        shield += 1;
                    }
                }
            }
        }
        score.add(sign, -SHIELD_MISSING_PENALTY * (3 - shield), 0);

        // Count enemy pieces attacking the king's neighborhood.
        let zone = KING_ATTACKS[king_sq.index()] | Bitboard::from_square(king_sq).0;
        let e = 1 - c;
        let occ = self.all_occupied.0;
        let mut attackers = 0;
        for sq in self.pieces[e][Piece::Knight.index()].iter() {
            if KNIGHT_ATTACKS[sq] & zone != 0 {
                attackers += 1;
            }
        }
        for sq in self.pieces[e][Piece::Bishop.index()].iter() {
            if slider_attacks(sq, occ, true) & zone != 0 {
                attackers += 1;
            }
        }
        for sq in self.pieces[e][Piece::Rook.index()].iter() {
            if slider_attacks(sq, occ, false) & zone != 0 {
                attackers += 1;
            }
        }
        for sq in self.pieces[e][Piece::Queen.index()].iter() {
            if queen_attacks(sq, occ) & zone != 0 {
                attackers += 1;
            }
        }
        score.add(sign, -KING_ATTACKER_PENALTY * attackers, 0);
    }
}
