//! End-to-end tokenization scenarios.

use bytebpe_tokenizer::{
    ByteCodepointMap, NormalizationForm, Token, Tokenizer, TokenizerError, UNK_TOKEN_ID,
};

/// Every byte character as its own token, ids 0..256, plus a few merges.
fn byte_tokenizer(normalization: NormalizationForm) -> Tokenizer {
    let bytes = ByteCodepointMap::new();
    let mut vocab: Vec<(String, i64)> = (0..=255u8)
        .map(|b| (bytes.byte_to_char(b).to_string(), i64::from(b)))
        .collect();
    vocab.extend([
        ("Ġt".to_string(), 256),
        ("he".to_string(), 257),
        ("Ġthe".to_string(), 258),
        ("ãĥ".to_string(), 259),
        ("ãĥŃ".to_string(), 260),
    ]);

    Tokenizer::builder()
        .vocab(vocab)
        .merges(["Ġ t", "h e", "Ġt he", "ã ĥ", "ãĥ Ń"])
        .normalization(normalization)
        .build()
        .unwrap()
}

#[test]
fn test_merges_follow_rank_order() {
    let tokenizer = byte_tokenizer(NormalizationForm::NFC);
    let tokens = tokenizer.tokenize("in the end");

    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["i", "n", "Ġthe", "Ġ", "e", "n", "d"]);
    assert_eq!(tokens[2], Token::new(258, "Ġthe"));
    assert_eq!(tokenizer.render_text(&tokens), "in the end");
}

#[test]
fn test_whole_character_tokens_round_trip() {
    let tokenizer = byte_tokenizer(NormalizationForm::NFC);
    let text = "ロ and ロ";
    let tokens = tokenizer.tokenize(text);

    assert_eq!(tokens[0], Token::new(260, "ãĥŃ"));
    assert!(tokens.iter().all(|t| t.id != UNK_TOKEN_ID));
    assert_eq!(tokenizer.render_text(&tokens), text);
}

#[test]
fn test_character_split_across_tokens_renders_replacement() {
    let tokenizer = byte_tokenizer(NormalizationForm::NFC);
    // "ボ" is e3 83 9c; only the first two bytes merge
    let tokens = tokenizer.tokenize("ボ");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].id, 259);
    assert_eq!(tokenizer.render_text(&tokens), "\u{FFFD}\u{FFFD}");

    let decoded = tokenizer.decode_tokens(&tokens);
    assert_eq!(decoded[0].id, 259);
    assert_eq!(decoded[0].text, "\u{FFFD}");
}

#[test]
fn test_tie_break_leftmost_pair_wins() {
    let tokenizer = Tokenizer::builder()
        .vocab([("a", 0), ("aa", 1)])
        .merges(["a a"])
        .build()
        .unwrap();

    assert_eq!(
        tokenizer.tokenize("aaa"),
        vec![Token::new(1, "aa"), Token::new(0, "a")]
    );
    assert_eq!(
        tokenizer.tokenize("aaaa"),
        vec![Token::new(1, "aa"), Token::new(1, "aa")]
    );
}

#[test]
fn test_unknown_characters_become_unk() {
    let tokenizer = Tokenizer::builder()
        .vocab([("a", 0), ("b", 1), ("ab", 2)])
        .merges(["a b"])
        .build()
        .unwrap();

    let tokens = tokenizer.tokenize("abc ab");
    let ids: Vec<i64> = tokens.iter().map(|t| t.id).collect();
    // "c", "Ġ" are not in the vocabulary
    assert_eq!(ids, vec![2, UNK_TOKEN_ID, UNK_TOKEN_ID, 2]);
    assert_eq!(
        tokenizer.render_text(&tokens),
        "ab<|endoftext|><|endoftext|>ab"
    );
}

#[test]
fn test_pre_tokenize_fixtures() {
    let tokenizer = byte_tokenizer(NormalizationForm::NFC);

    assert_eq!(
        tokenizer.pre_tokenize("f<unk>y ロK  lkj"),
        vec!["f", "<", "unk", ">", "y", "ĠãĥŃK", "Ġ", "Ġlkj"]
    );
    assert_eq!(
        tokenizer.pre_tokenize("sa9jj2r $h .,x"),
        vec!["sa", "9", "jj", "2", "r", "Ġ$", "h", "Ġ.,", "x"]
    );
    assert_eq!(
        tokenizer.pre_tokenize("__      :x"),
        vec!["__", "ĠĠĠĠĠ", "Ġ:", "x"]
    );
}

#[test]
fn test_normalization_form_is_applied() {
    let decomposed = "e\u{0301}";

    let nfc = byte_tokenizer(NormalizationForm::NFC);
    assert_eq!(nfc.pre_tokenize(decomposed), vec!["Ã©"]);

    // the combining mark is not a letter, so it forms its own fragment
    let raw = byte_tokenizer(NormalizationForm::None);
    let fragments = raw.pre_tokenize(decomposed);
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0], "e");
}

#[test]
fn test_merge_with_missing_piece_is_rejected() {
    let err = Tokenizer::builder()
        .vocab([("a", 0), ("aa", 1)])
        .merges(["a a", "aa b"])
        .build()
        .unwrap_err();

    match err {
        TokenizerError::MergePieceNotInVocab { rank, piece } => {
            assert_eq!(rank, 1);
            assert_eq!(piece, "b");
        }
        other => panic!("unexpected error: {other}"),
    }
}
