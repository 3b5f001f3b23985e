// Terminal front end for the draft lottery.

pub mod tui;
