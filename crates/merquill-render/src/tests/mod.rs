mod command_host;
mod fakes;
mod renderer;
