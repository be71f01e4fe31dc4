mod fixture;
mod groups;
mod health;
