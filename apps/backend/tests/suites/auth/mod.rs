mod gate;
mod login;
mod token_lifecycle;
