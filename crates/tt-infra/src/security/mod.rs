mod notes_cipher;

pub use notes_cipher::NotesCipher;
