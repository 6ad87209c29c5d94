mod act;
mod final_phase;
mod init;
mod movement;
mod orient;
mod post;
mod pre;
