//! Built-in opening book: comma-joined move history mapped to the reply to
//! play. Consulted only while the game is young; every reply is validated
//! against the legal move list before use.

/// (history so far, reply). An empty history means the starting position.
#[rustfmt::skip]
const BOOK: &[(&str, &str)] = &[
    // White to move
    ("", "e2e4"),
    ("e2e4,e7e5", "g1f3"),
    ("e2e4,e7e5,g1f3,b8c6", "f1c4"),                              // Italian
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5", "c2c3"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,f8c5,c2c3", "g8f6"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4,g8f6", "d2d3"),
    ("e2e4,e7e5,g1f3,g8f6", "b1c3"),                              // Petrov
    ("e2e4,c7c5", "g1f3"),                                        // Sicilian
    ("e2e4,c7c5,g1f3,d7d6", "d2d4"),
    ("e2e4,c7c5,g1f3,b8c6", "d2d4"),
    ("e2e4,c7c5,g1f3,e7e6", "d2d4"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4", "f3d4"),
    ("e2e4,c7c5,g1f3,b8c6,d2d4,c5d4", "f3d4"),
    ("e2e4,c7c5,g1f3,d7d6,d2d4,c5d4,f3d4,g8f6", "b1c3"),
    ("e2e4,e7e6", "d2d4"),                                        // French
    ("e2e4,e7e6,d2d4,d7d5", "b1c3"),
    ("e2e4,e7e6,d2d4,d7d5,b1c3,g8f6", "c1g5"),
    ("e2e4,e7e6,d2d4,d7d5,b1c3,f8b4", "e4e5"),                    // Winawer
    ("e2e4,c7c6", "d2d4"),                                        // Caro-Kann
    ("e2e4,c7c6,d2d4,d7d5", "b1c3"),
    ("e2e4,c7c6,d2d4,d7d5,b1c3,d5e4", "c3e4"),
    ("e2e4,d7d5", "e4d5"),                                        // Scandinavian
    ("e2e4,d7d5,e4d5,d8d5", "b1c3"),
    ("e2e4,d7d5,e4d5,d8d5,b1c3,d5a5", "d2d4"),
    ("e2e4,d7d5,e4d5,g8f6", "d2d4"),
    ("e2e4,g8f6", "e4e5"),                                        // Alekhine
    ("e2e4,g8f6,e4e5,f6d5", "d2d4"),
    ("e2e4,g8f6,e4e5,f6d5,d2d4,d7d6", "g1f3"),
    ("e2e4,d7d6", "d2d4"),                                        // Pirc
    ("e2e4,d7d6,d2d4,g8f6", "b1c3"),
    ("e2e4,g7g6", "d2d4"),                                        // Modern
    ("e2e4,g7g6,d2d4,f8g7", "b1c3"),
    // Black to move
    ("e2e4", "e7e5"),
    ("e2e4,g1f3", "b8c6"),
    ("e2e4,f1c4", "g8f6"),
    ("e2e4,b1c3", "g8f6"),
    ("e2e4,e7e5,g1f3", "b8c6"),
    ("e2e4,e7e5,g1f3,b8c6,f1c4", "f8c5"),
    ("e2e4,e7e5,g1f3,b8c6,f1b5", "a7a6"),                         // Ruy Lopez
    ("e2e4,e7e5,g1f3,b8c6,f1b5,a7a6,b5a4", "g8f6"),
    ("e2e4,e7e5,g1f3,b8c6,d2d4", "e5d4"),                         // Scotch
    ("e2e4,e7e5,g1f3,b8c6,d2d4,e5d4,f3d4", "f8c5"),
    ("d2d4", "g8f6"),
    ("d2d4,g8f6,c2c4", "g7g6"),                                   // King's Indian
    ("d2d4,g8f6,c2c4,g7g6,b1c3", "f8g7"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,f8g7,e2e4", "d7d6"),
    ("d2d4,g8f6,c2c4,g7g6,b1c3,f8g7,e2e4,d7d6,g1f3", "e8g8"),
    ("d2d4,g8f6,g1f3", "g7g6"),
    ("d2d4,g8f6,c1f4", "d7d5"),                                   // vs London
    ("d2d4,g8f6,c1f4,d7d5,e2e3", "e7e6"),
    ("d2d4,d7d5,c2c4", "e7e6"),                                   // QGD
    ("d2d4,d7d5,c2c4,e7e6,b1c3", "g8f6"),
    ("d2d4,d7d5,c2c4,c7c6", "g8f6"),                              // Slav
    ("d2d4,d7d5,c2c4,d5c4", "g1f3"),
    ("c2c4", "e7e5"),                                             // English
    ("c2c4,e7e5,b1c3", "g8f6"),
    ("c2c4,e7e5,b1c3,g8f6,g1f3", "b8c6"),
    ("c2c4,g8f6", "g7g6"),
    ("g1f3", "d7d5"),
    ("g1f3,d7d5,d2d4", "g8f6"),
    ("g1f3,g8f6", "d7d5"),
    ("b2b3", "e7e5"),
    ("g2g3", "d7d5"),
    ("f2f4", "d7d5"),
];

/// The book reply for this move history, if one is known.
pub fn book_move(history: &[String]) -> Option<&'static str> {
    let key = history.join(",");

    BOOK.iter()
        .find(|(line, _)| *line == key)
        .map(|&(_, reply)| reply)
}
