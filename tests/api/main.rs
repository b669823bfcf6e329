mod health_check;
mod helpers;
mod landing;
mod waitlist;
