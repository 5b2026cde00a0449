//! Reading and writing locale, patch and dictionary files.

pub mod locale_file;

pub use locale_file::{
    InputError,
    LocaleFile,
    detect_language_from_path,
    languages_match,
    load_dictionary_file,
    load_locale_file,
    load_patch_file,
    render_locale_tree,
    save_locale_file,
};
