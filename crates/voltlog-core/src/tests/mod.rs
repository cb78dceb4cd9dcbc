mod export;
mod recorder;
