//! Two minimax bots play tic-tac-toe against each other.
//!
//! Run with `RUST_LOG=debug cargo run --example self_play` to see the
//! search statistics for every move.

use minimax::{Board, MinimaxBot, Move, Utility};

fn main() {
    env_logger::init();

    let root = Board::new();
    let bot = MinimaxBot::<Board>::new();

    println!("Solving the empty board.");
    let now = std::time::Instant::now();
    let res = bot.search(&root).expect("the empty board has moves");
    println!(
        "Solved root in {} microseconds ({} nodes)",
        now.elapsed().as_micros(),
        res.nodes
    );

    // TicTacToe is a draw between perfect players
    assert_eq!(res.value, Utility::Draw);

    println!("Solving a board with an X in the top left.");
    let x_top_left = root.apply_move(Move::new(0, 0)).expect("empty cell");

    // An optimal O player must play middle in response to corner
    assert_eq!(bot.best_move(&x_top_left), Some(Move::new(1, 1)));

    println!("Solving a board with an X in the top left, O in the middle right.");
    let x_o_board = x_top_left.apply_move(Move::new(1, 2)).expect("empty cell");

    // O played suboptimally, so X should win
    assert_eq!(bot.value(&x_o_board), Utility::FirstWins);

    let mut game = root;
    println!("Simulating a bot TicTacToe game.\n{}", game);
    while let Some(mv) = bot.best_move(&game) {
        let mark = game.whose_turn();
        game = game.apply_move(mv).expect("bot moves are legal");
        println!("{} plays {}\n{}", mark, mv, game);
    }
    println!("Result: {:?}", game.utility());
}
