mod library_browser;
